use super::CandidateFile;
use super::GenerationConfig;

pub enum Action {
    CancelWorkflow(),
    SubmitWorkflow(CandidateFile, GenerationConfig),
}

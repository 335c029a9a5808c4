use tui_textarea::Input;

use super::CompletionSummary;
use super::Destination;

pub enum Event {
    KeyboardBackTab(),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    KeyboardTab(),
    SessionCreated(String),
    UIResize(),
    UITick(),
    WorkflowCancelled(),
    WorkflowComplete(Destination, CompletionSummary),
    WorkflowFailed(String),
    WorkflowProgress(String),
}

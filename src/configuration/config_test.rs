use anyhow::Result;

use super::Config;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta::assert_snapshot!(res, @r###"
    # API key sent with each generation request. Never written to disk by quizforge.
    # api-key = ""

    # Review and edit generated questions before taking the quiz. [possible values: true, false]
    enable-review = "false"

    # Time to wait in milliseconds before timing out when doing a healthcheck for the generation server.
    health-check-timeout = 1000

    # Time to wait in milliseconds between status checks while the server processes a document.
    poll-interval = 2000

    # How much effort the server puts into generated questions. [possible values: fast, standard, high]
    quality = "standard"

    # The URL of the question generation server.
    server-url = "http://localhost:5000"
    "###);
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["quizforge", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["quizforge", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

pub mod case;
pub mod config_cmd;
pub mod project;

use qase_cli_api::QaseClient;
use qase_cli_output::OutputRenderer;

pub struct CommandContext<'a> {
    pub client: QaseClient,
    pub renderer: &'a OutputRenderer,
}

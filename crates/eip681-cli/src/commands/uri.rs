use eip681_core::RequestEncoder;

use crate::commands::{request_summary, IntentArgs};
use crate::output::{CommandOutput, OutputHandler, RequestResult};
use crate::CliError;

pub fn run(intent: &IntentArgs, output: &mut dyn OutputHandler) -> Result<CommandOutput, CliError> {
    output.progress("validating payment request");

    let intent = intent.resolve()?;
    let uri = RequestEncoder::standard().payment_uri(&intent)?;
    output.display_request(&request_summary(&intent, &uri));

    Ok(CommandOutput::success("uri", &uri.uri, RequestResult::from(&uri)))
}

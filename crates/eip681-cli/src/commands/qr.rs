use std::fs;
use std::path::Path;

use eip681_core::{ChecksumAddressValidator, DecimalUnitConverter, PngQrRenderer, RequestEncoder};

use crate::commands::{request_summary, IntentArgs};
use crate::output::{CommandOutput, OutputHandler, RequestResult};
use crate::CliError;

pub async fn run(
    intent: &IntentArgs,
    out: Option<&Path>,
    size: u32,
    output: &mut dyn OutputHandler,
) -> Result<CommandOutput, CliError> {
    output.progress("validating payment request");

    let intent = intent.resolve()?;
    let encoder = RequestEncoder::new(
        ChecksumAddressValidator,
        DecimalUnitConverter,
        PngQrRenderer::new(size),
    );
    let uri = encoder.payment_uri(&intent)?;
    output.display_request(&request_summary(&intent, &uri));

    output.progress("rendering QR code");
    let payload = encoder.encode(&intent).await?;

    let mut result = RequestResult::from(&uri);
    match out {
        Some(path) => {
            let png = payload.png_bytes().ok_or_else(|| {
                CliError::Internal("renderer did not produce a PNG data URI".to_string())
            })?;
            fs::write(path, &png)?;
            tracing::info!(path = %path.display(), bytes = png.len(), "wrote QR code");
            result.file = Some(path.display().to_string());
        }
        None => {
            result.data_uri = Some(payload.into_string());
        }
    }

    Ok(CommandOutput::success("qr", "QR code generated", result))
}

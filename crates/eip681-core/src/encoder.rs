use crate::eip681::build_payment_uri;
use crate::error::Result;
use crate::qr::{ImagePayload, PngQrRenderer, QrRenderer};
use crate::types::{PaymentIntent, PaymentUri};
use crate::units::{DecimalUnitConverter, UnitConverter};
use crate::validation::{AddressValidator, ChecksumAddressValidator};

/// Validates payment intents and renders their EIP-681 request as a QR code.
///
/// Holds no state between calls; share one behind an `Arc` to encode
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct RequestEncoder<V = ChecksumAddressValidator, C = DecimalUnitConverter, R = PngQrRenderer>
{
    validator: V,
    converter: C,
    renderer: R,
}

impl RequestEncoder {
    pub fn standard() -> Self {
        Self::default()
    }
}

impl<V, C, R> RequestEncoder<V, C, R>
where
    V: AddressValidator,
    C: UnitConverter,
    R: QrRenderer,
{
    pub fn new(validator: V, converter: C, renderer: R) -> Self {
        Self {
            validator,
            converter,
            renderer,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Canonical request string, without rendering.
    pub fn payment_uri(&self, intent: &PaymentIntent) -> Result<PaymentUri> {
        build_payment_uri(intent, &self.validator, &self.converter)
    }

    /// Renders `intent` once it passes validation. The renderer is never
    /// invoked for invalid input; its failures come back as
    /// [`RenderFailure`](crate::Eip681Error::RenderFailure).
    pub async fn encode(&self, intent: &PaymentIntent) -> Result<ImagePayload> {
        let uri = self.payment_uri(intent)?;
        let payload = self.renderer.render(uri.as_str()).await?;
        Ok(payload)
    }
}

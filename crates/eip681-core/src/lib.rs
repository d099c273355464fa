//! # eip681-core
//!
//! Builds and validates EIP-681 payment requests and renders them as QR codes.
//!
//! A [`PaymentIntent`] describes one of four shapes: a native transfer or an
//! ERC-20 `transfer` call, each on mainnet or on an explicit chain. The
//! [`RequestEncoder`] checks the intent, converts the ether amount to wei
//! exactly, assembles the canonical request string and hands it to a
//! [`QrRenderer`].
//!
//! ```no_run
//! use eip681_core::{PaymentIntent, RequestEncoder};
//!
//! # async fn run() -> eip681_core::Result<()> {
//! let encoder = RequestEncoder::standard();
//! let intent = PaymentIntent::native("0x7772fb5804c9C60B76C56aBEEb79f2F6d54519C4", "0.1");
//! assert_eq!(
//!     encoder.payment_uri(&intent)?.uri,
//!     "ethereum:0x7772fb5804c9C60B76C56aBEEb79f2F6d54519C4@1?value=100000000000000000"
//! );
//! let qr = encoder.encode(&intent).await?;
//! assert!(qr.as_str().starts_with("data:image/png;base64,"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod eip681;
pub mod encoder;
pub mod error;
pub mod qr;
pub mod types;
pub mod units;
pub mod validation;

pub use encoder::RequestEncoder;
pub use error::{ChainIdParseError, Eip681Error, Field, RenderError, Result, UnitError};
pub use qr::{ImagePayload, PngQrRenderer, QrRenderer, PNG_DATA_URI_PREFIX};
pub use types::{ChainId, IntentKind, PaymentIntent, PaymentUri};
pub use units::{DecimalUnitConverter, Unit, UnitConverter};
pub use validation::{AddressValidator, ChecksumAddressValidator};

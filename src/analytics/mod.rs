//! Payment sheet analytics events: names, params and the values they carry.

pub mod errors;
pub mod event;
pub mod selection;

pub use errors::{ApiError, ApiErrorKind, ConfirmationError};
pub use event::{CbcEventSource, EventRecord, PaymentResult, PaymentSheetEvent};
pub use selection::{
    CardBrand, DeferredIntentConfirmationType, DeferredMode, EventMode, InitializationMode,
    LinkMode, PaymentSelection,
};

use std::borrow::Cow;

/// Errors raised while resolving a feature's live status.
///
/// The registry never produces these on its own; they come from custom resolvers and are
/// handed back to the caller untouched.
#[entitle_derive::entitle_error]
pub enum FeatureError {
    /// The resolver could not determine the status (e.g., the license check was rejected).
    #[error("Feature resolution failed{}: {message}", format_context(.context))]
    Resolution { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// An external system consulted by the resolver failed.
    #[error("Upstream entitlement source failed{}: {source}", format_context(.context))]
    Upstream {
        source: Box<dyn std::error::Error + Send + Sync>,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal feature registry error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

//! Message-only error types for transport, parsing and configuration failures.
//!
//! These carry a rendered message plus the location where they were raised. They
//! share one shape, so they are stamped out by [`message_error!`].

macro_rules! message_error {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
        #[display("{}: {} at line {} in {}", $label, message, line, file)]
        pub struct $name {
            /// The underlying error message
            pub message: String,
            /// Line number where the error occurred
            pub line: u32,
            /// File where the error occurred
            pub file: &'static str,
        }

        impl $name {
            /// Create a new error with the given message at the caller's location.
            #[track_caller]
            pub fn new(message: impl Into<String>) -> Self {
                let location = std::panic::Location::caller();
                Self {
                    message: message.into(),
                    line: location.line(),
                    file: location.file(),
                }
            }
        }
    };
}

message_error!(
    /// Transport-level failure talking to the provider (connect, TLS, body read).
    ///
    /// ```
    /// use storyboard_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert!(err.to_string().starts_with("HTTP Error: Connection refused"));
    /// ```
    HttpError,
    "HTTP Error"
);

message_error!(
    /// Serialization or deserialization failure outside a provider payload.
    ///
    /// ```
    /// use storyboard_error::JsonError;
    ///
    /// let err = JsonError::new("expected `,` at line 3");
    /// assert!(err.message.contains("line 3"));
    /// ```
    JsonError,
    "JSON Error"
);

message_error!(
    /// Invalid or unreadable configuration.
    ///
    /// ```
    /// use storyboard_error::ConfigError;
    ///
    /// let err = ConfigError::new("Unknown art style: Pastel");
    /// assert!(err.to_string().contains("Configuration Error"));
    /// ```
    ConfigError,
    "Configuration Error"
);

message_error!(
    /// Local file read or write failure (script input, rendered panels).
    ///
    /// ```
    /// use storyboard_error::IoError;
    ///
    /// let err = IoError::new("script.txt: No such file or directory");
    /// assert!(err.to_string().starts_with("IO Error: script.txt"));
    /// ```
    IoError,
    "IO Error"
);

//! Generation-service client.
//!
//! * [`GenerationClient`] — async trait the orchestrator talks to.
//! * [`HttpGenerationClient`] — reqwest implementation posting JSON.
//! * [`GenerationError`] — remote, transport and decode failures.
//! * Wire bodies: [`GenerateRequest`], [`RequestResult`], [`ErrorBody`],
//!   [`ServiceHealth`].
//!
//! ```rust,no_run
//! use text_to_video::client::{GenerationClient, HttpGenerationClient};
//! use text_to_video::config::AppConfig;
//! use text_to_video::form::{FormMode, SubmissionForm};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let client = HttpGenerationClient::from_config(&config.service);
//!
//!     let mut form = SubmissionForm::new(FormMode::Simple, config.defaults.options());
//!     form.insert_example(0);
//!     let payload = form.submit(false).unwrap();
//!
//!     match client.generate(&payload).await {
//!         Ok(result) => println!("{}", result.media_locator),
//!         Err(e) => eprintln!("{}", e.user_message()),
//!     }
//! }
//! ```

pub mod api;
pub mod wire;

pub use api::{
    GenerationClient, GenerationError, HttpGenerationClient, GENERIC_FAILURE, UNKNOWN_FAILURE,
};
pub use wire::{ErrorBody, GenerateRequest, RequestResult, ServiceHealth};

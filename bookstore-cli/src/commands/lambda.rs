//! Lambda runtime loop
//!
//! One dispatcher (and so one lazily built pool) per execution environment;
//! every invocation borrows it.

use anyhow::{anyhow, Result};
use lambda_runtime::{service_fn, Error, LambdaEvent};

use bookstore_server::{postgres_dispatcher, RequestEvent, ResponseEnvelope};

/// Serve invocations until the runtime shuts the environment down
pub async fn run_lambda() -> Result<()> {
    let dispatcher = postgres_dispatcher();
    let dispatcher = &dispatcher;

    tracing::info!("Starting Lambda runtime");
    lambda_runtime::run(service_fn(move |event: LambdaEvent<RequestEvent>| async move {
        tracing::debug!(request_id = %event.context.request_id, "invocation received");
        Ok::<ResponseEnvelope, Error>(dispatcher.handle(event.payload).await)
    }))
    .await
    .map_err(|err| anyhow!(err))
}

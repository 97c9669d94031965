use aws_config::{BehaviorVersion, Region};
use aws_sdk_ses::error::DisplayErrorContext;
use aws_sdk_ses::types::{Body, Content, Destination, Message};
use contact_relay_lambda::adapters::mail::MailTransport;
use contact_relay_lambda::config::RelayConfig;
use contact_relay_lambda::handlers::relay::{handle_relay_event, RelayResponse};
use contact_relay_lambda::relay::error::MailTransportError;
use contact_relay_lambda::relay::message::OutboundEmail;
use contact_relay_lambda::telemetry::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct SesMailTransport {
    ses_client: aws_sdk_ses::Client,
}

impl MailTransport for SesMailTransport {
    fn send_email(&self, email: &OutboundEmail) -> Result<(), MailTransportError> {
        let message = build_message(email)?;
        let client = self.ses_client.clone();
        let source = email.sender.clone();
        let destination = Destination::builder()
            .to_addresses(email.recipient.clone())
            .build();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_email()
                    .source(source)
                    .destination(destination)
                    .message(message)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        MailTransportError::Send(DisplayErrorContext(&error).to_string())
                    })
            })
        })
    }
}

fn build_message(email: &OutboundEmail) -> Result<Message, MailTransportError> {
    let content = |data: &str| {
        Content::builder()
            .data(data)
            .charset(email.charset.as_str())
            .build()
            .map_err(|error| MailTransportError::Build(error.to_string()))
    };

    Ok(Message::builder()
        .subject(content(&email.subject)?)
        .body(Body::builder().text(content(&email.text_body)?).build())
        .build())
}

async fn handle_request(
    event: LambdaEvent<Value>,
    config: &RelayConfig,
    transport: &SesMailTransport,
) -> Result<RelayResponse, Error> {
    Ok(handle_relay_event(event.payload, config, transport))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = RelayConfig::from_env();
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.ses_region.clone()))
        .load()
        .await;
    let transport = SesMailTransport {
        ses_client: aws_sdk_ses::Client::new(&aws_config),
    };

    let config = &config;
    let transport = &transport;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, config, transport).await
    }))
    .await
}

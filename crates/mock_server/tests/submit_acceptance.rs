use std::sync::Arc;

use futures::future::join_all;
use mock_server::{MockProfileServer, PhoneDigitPolicy, ProfileSubmitter};
use shared::{domain::ProfileRecord, protocol::SubmitResponse};

fn record(first: &str, last: &str, phone: &str, newsletter: bool) -> ProfileRecord {
    ProfileRecord {
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone_number: phone.to_string(),
        receive_newsletter: newsletter,
    }
}

#[tokio::test]
async fn valid_records_are_accepted_verbatim() {
    let server = MockProfileServer::instant(PhoneDigitPolicy::AllNonDigits);
    let records = [
        record("Ann", "Lee", "99882233", false),
        record("Ola", "Nordmann", "12345678", true),
        record("Kari", "O'Brien", "9988 2233", false),
    ];

    for candidate in records {
        let response = server.submit(candidate.clone()).await;
        assert_eq!(response, SubmitResponse::Profile(candidate));
    }
}

#[tokio::test]
async fn missing_first_name_is_reported_on_the_wire() {
    let server = MockProfileServer::instant(PhoneDigitPolicy::AllNonDigits);
    let response = server.submit(record("", "Lee", "99882233", false)).await;

    let json = serde_json::to_value(&response).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({ "errors": { "firstName": { "message": "Missing first name!" } } })
    );
}

#[tokio::test]
async fn repeated_submissions_are_idempotent() {
    let server: Arc<dyn ProfileSubmitter> =
        Arc::new(MockProfileServer::instant(PhoneDigitPolicy::AllNonDigits));
    let candidate = record("Ann", "", "1234", true);

    let responses = join_all((0..4).map(|_| {
        let server = Arc::clone(&server);
        let candidate = candidate.clone();
        async move { server.submit(candidate).await }
    }))
    .await;

    let first = &responses[0];
    assert!(!first.is_accepted());
    assert!(responses.iter().all(|response| response == first));
}

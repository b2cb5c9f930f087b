mod helpers;

use helpers::{issuance_message, other_message, MockKeyValueStore, MockLedgerRpc};
use ledger_dns_application::services::RecordIndex;
use ledger_dns_application::use_cases::{MergeIssuanceUseCase, SyncLedgerUseCase};
use ledger_dns_domain::{DomainError, SyncOutcome};
use serde_json::json;
use std::sync::Arc;

const ACTIVATION: u64 = 100;

fn make_use_case(ledger: Arc<MockLedgerRpc>, store: Arc<MockKeyValueStore>) -> SyncLedgerUseCase {
    let index = RecordIndex::new(store);
    let merge = Arc::new(MergeIssuanceUseCase::new(index.clone()));
    SyncLedgerUseCase::new(ledger, index, merge, ACTIVATION - 1)
}

async fn cursor(store: &Arc<MockKeyValueStore>) -> u64 {
    RecordIndex::new(store.clone()).cursor(ACTIVATION - 1).await.unwrap()
}

#[tokio::test]
async fn test_catching_up_does_nothing() {
    let ledger = Arc::new(MockLedgerRpc::new());
    ledger.set_running_info(false, Some(500)).await;
    let store = Arc::new(MockKeyValueStore::new());
    let use_case = make_use_case(ledger.clone(), store.clone());

    let outcome = use_case.run_iteration().await.unwrap();

    assert_eq!(outcome, SyncOutcome::CatchingUp);
    assert!(ledger.fetched_heights().await.is_empty());
    assert_eq!(store.put_count(), 0);
}

#[tokio::test]
async fn test_missing_block_count_counts_as_catching_up() {
    let ledger = Arc::new(MockLedgerRpc::new());
    ledger.set_running_info(true, None).await;
    let use_case = make_use_case(ledger, Arc::new(MockKeyValueStore::new()));

    assert_eq!(use_case.run_iteration().await.unwrap(), SyncOutcome::CatchingUp);
}

#[tokio::test]
async fn test_first_run_starts_at_activation_height() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION + 5));
    let store = Arc::new(MockKeyValueStore::new());
    let use_case = make_use_case(ledger.clone(), store.clone());

    let outcome = use_case.run_iteration().await.unwrap();

    match outcome {
        SyncOutcome::Processed(report) => assert_eq!(report.height, ACTIVATION),
        other => panic!("expected a processed block, got {:?}", other),
    }
    assert_eq!(ledger.fetched_heights().await, vec![ACTIVATION]);
    assert_eq!(cursor(&store).await, ACTIVATION);
}

#[tokio::test]
async fn test_one_block_per_iteration_in_order() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION + 2));
    let store = Arc::new(MockKeyValueStore::new());
    let use_case = make_use_case(ledger.clone(), store.clone());

    for _ in 0..5 {
        let before = cursor(&store).await;
        use_case.run_iteration().await.unwrap();
        let after = cursor(&store).await;
        assert!(after >= before);
        assert!(after - before <= 1);
    }

    assert_eq!(
        ledger.fetched_heights().await,
        vec![ACTIVATION, ACTIVATION + 1, ACTIVATION + 2]
    );
    assert_eq!(
        use_case.run_iteration().await.unwrap(),
        SyncOutcome::Idle { cursor: ACTIVATION + 2 }
    );
}

#[tokio::test]
async fn test_block_issuances_reach_the_index() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION));
    ledger
        .add_block(
            ACTIVATION,
            vec![
                other_message("sends"),
                issuance_message("myasset", "+1/1,A,10.0.0.1"),
                issuance_message("myasset", "+2/1,CNAME,www,target.example"),
                issuance_message("other", "no directive here"),
            ],
        )
        .await;
    let store = Arc::new(MockKeyValueStore::new());
    let use_case = make_use_case(ledger, store.clone());

    let outcome = use_case.run_iteration().await.unwrap();

    let SyncOutcome::Processed(report) = outcome else {
        panic!("expected a processed block");
    };
    assert_eq!(report.messages, 4);
    assert_eq!(report.issuances, 3);
    assert_eq!(report.merged, 2);

    let doc = RecordIndex::new(store.clone()).load("myasset").await.unwrap();
    assert_eq!(doc.get("A", "myasset").len(), 1);
    assert_eq!(doc.get("CNAME", "www.myasset")[0].value, "target.example");
    assert!(store.raw("zone:other").await.is_none());
}

#[tokio::test]
async fn test_end_to_end_document_shape() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION));
    ledger
        .add_block(ACTIVATION, vec![issuance_message("myasset", "+1/1,A,10.0.0.1")])
        .await;
    let store = Arc::new(MockKeyValueStore::new());
    let use_case = make_use_case(ledger, store.clone());

    use_case.run_iteration().await.unwrap();

    let raw = store.raw("zone:myasset").await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        json!({ "A": { "myasset": [ { "index": "1", "weight": "1", "value": "10.0.0.1" } ] } })
    );
}

#[tokio::test]
async fn test_failed_merge_keeps_cursor_and_retries_block() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION + 1));
    ledger
        .add_block(
            ACTIVATION,
            vec![
                issuance_message("good", "+1,A,10.0.0.1"),
                issuance_message("bad", "+1,A,10.0.0.2"),
            ],
        )
        .await;
    let store = Arc::new(MockKeyValueStore::new());
    store.fail_writes_for("zone:bad").await;
    let use_case = make_use_case(ledger.clone(), store.clone());

    let result = use_case.run_iteration().await;

    assert!(matches!(
        result,
        Err(DomainError::BlockIncomplete { height: ACTIVATION, failed: 1 })
    ));
    assert_eq!(cursor(&store).await, ACTIVATION - 1);

    store.heal().await;
    let outcome = use_case.run_iteration().await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Processed(ref r) if r.height == ACTIVATION));
    assert_eq!(ledger.fetched_heights().await, vec![ACTIVATION, ACTIVATION]);
    assert_eq!(cursor(&store).await, ACTIVATION);

    // Only the asset that failed is merged again on the retry.
    assert!(matches!(outcome, SyncOutcome::Processed(ref r) if r.merged == 1));
    let good = RecordIndex::new(store.clone()).load("good").await.unwrap();
    assert_eq!(good.get("A", "good").len(), 1);
    let bad = RecordIndex::new(store).load("bad").await.unwrap();
    assert_eq!(bad.get("A", "bad").len(), 1);
}

#[tokio::test]
async fn test_read_failure_fails_block() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION));
    ledger
        .add_block(ACTIVATION, vec![issuance_message("myasset", "+1,A,10.0.0.1")])
        .await;
    let store = Arc::new(MockKeyValueStore::new());
    store.fail_reads_for("zone:myasset").await;
    let use_case = make_use_case(ledger, store.clone());

    assert!(use_case.run_iteration().await.is_err());
    assert_eq!(cursor(&store).await, ACTIVATION - 1);
}

#[tokio::test]
async fn test_same_asset_issuances_keep_ledger_order() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION));
    let messages = (1..=10)
        .map(|i| issuance_message("myasset", &format!("+{},A,www,10.0.0.{}", i, i)))
        .collect();
    ledger.add_block(ACTIVATION, messages).await;
    let store = Arc::new(MockKeyValueStore::new());
    let use_case = make_use_case(ledger, store.clone());

    use_case.run_iteration().await.unwrap();

    let doc = RecordIndex::new(store).load("myasset").await.unwrap();
    let values: Vec<String> = doc
        .get("A", "www.myasset")
        .iter()
        .map(|d| d.value.clone())
        .collect();
    let expected: Vec<String> = (1..=10).map(|i| format!("10.0.0.{}", i)).collect();
    assert_eq!(values, expected);
}

#[tokio::test]
async fn test_rpc_failure_is_returned_and_cursor_untouched() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION + 10));
    ledger.set_should_fail(true).await;
    let store = Arc::new(MockKeyValueStore::new());
    let use_case = make_use_case(ledger, store.clone());

    let err = use_case.run_iteration().await.unwrap_err();

    assert!(err.is_transient());
    assert_eq!(store.put_count(), 0);
}

#[tokio::test]
async fn test_malformed_bindings_do_not_block_cursor() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION));
    ledger
        .add_block(
            ACTIVATION,
            vec![
                ledger_dns_domain::LedgerMessage::new("issuances", "{oops"),
                issuance_message("myasset", "+1,A,10.0.0.1"),
            ],
        )
        .await;
    let store = Arc::new(MockKeyValueStore::new());
    let use_case = make_use_case(ledger, store.clone());

    let SyncOutcome::Processed(report) = use_case.run_iteration().await.unwrap() else {
        panic!("expected a processed block");
    };

    assert_eq!(report.malformed, 1);
    assert_eq!(report.merged, 1);
    assert_eq!(cursor(&store).await, ACTIVATION);
}

#[tokio::test]
async fn test_corrupt_document_is_rejected_without_stalling() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION + 1));
    ledger
        .add_block(
            ACTIVATION,
            vec![
                issuance_message("good", "+1,A,www,10.0.0.1"),
                issuance_message("bad", "+1,A,www,10.0.0.2"),
            ],
        )
        .await;
    let store = Arc::new(MockKeyValueStore::new());
    store.insert("zone:bad", "not json").await;
    let use_case = make_use_case(ledger.clone(), store.clone());

    let SyncOutcome::Processed(report) = use_case.run_iteration().await.unwrap() else {
        panic!("expected a processed block");
    };
    assert_eq!(report.merged, 1);
    assert_eq!(report.rejected, 1);
    assert_eq!(cursor(&store).await, ACTIVATION);

    for _ in 0..4 {
        use_case.run_iteration().await.unwrap();
    }

    assert_eq!(cursor(&store).await, ACTIVATION + 1);
    assert_eq!(ledger.fetched_heights().await, vec![ACTIVATION, ACTIVATION + 1]);
    let good = RecordIndex::new(store.clone()).load("good").await.unwrap();
    assert_eq!(good.get("A", "www.good").len(), 1);
    assert_eq!(store.raw("zone:bad").await.as_deref(), Some("not json"));
}

#[tokio::test]
async fn test_corrupt_cursor_is_not_transient() {
    let ledger = Arc::new(MockLedgerRpc::at_height(ACTIVATION + 1));
    let store = Arc::new(MockKeyValueStore::new());
    store.insert("sync:cursor", "abc").await;
    let use_case = make_use_case(ledger.clone(), store.clone());

    let err = use_case.run_iteration().await.unwrap_err();

    assert!(matches!(err, DomainError::CorruptDocument { ref key, .. } if key == "sync:cursor"));
    assert!(!err.is_transient());
    assert!(ledger.fetched_heights().await.is_empty());
}

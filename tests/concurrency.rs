//! Concurrent readers share one registry without locking.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use scm_codec::core::argument::{Argument, ArgumentType, ListArgument};
use scm_codec::core::types::{names, TypeInfo};
use scm_codec::protocol::messages::PipelineId;
use scm_codec::registry::CodecRegistry;
use std::sync::Arc;
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_encode_decode_heavy() {
    let iterations = 2_000usize;
    let list_sizes = [0usize, 1, 16, 256];
    let registry = Arc::new(CodecRegistry::with_defaults().unwrap());

    let mut tasks = JoinSet::new();
    for &size in &list_sizes {
        let registry = Arc::clone(&registry);
        tasks.spawn(async move {
            let list_type = TypeInfo::leaf(names::LIST);
            for i in 0..iterations {
                let values: Vec<i64> = (0..size).map(|n| (n + i) as i64).collect();
                let value = Argument::List(ListArgument::from_values(values.clone()).unwrap());

                let bytes = registry.encode(&value).unwrap();
                let decoded = registry.decode(&bytes, &list_type).unwrap();
                match decoded {
                    Argument::List(list) => assert_eq!(list.into_values::<i64>().unwrap(), values),
                    other => panic!("expected list, got {other:?}"),
                }

                let pipeline = PipelineId::random();
                let bytes = registry.encode_value(pipeline).unwrap();
                assert_eq!(registry.decode_value::<PipelineId>(&bytes).unwrap(), pipeline);
            }
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }

    let snapshot = registry.metrics().snapshot();
    let total = (iterations * list_sizes.len()) as u64;
    assert_eq!(snapshot.list_encodes, total);
    assert_eq!(snapshot.list_decodes, total);
    assert_eq!(snapshot.list_decode_failures, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_resolution_returns_same_codec() {
    let registry = Arc::new(CodecRegistry::with_defaults().unwrap());
    let expected = registry.resolve(&PipelineId::type_info()).unwrap();

    let mut tasks = JoinSet::new();
    for _ in 0..16 {
        let registry = Arc::clone(&registry);
        let expected = Arc::clone(&expected);
        tasks.spawn(async move {
            for _ in 0..1_000 {
                let codec = registry.resolve(&PipelineId::type_info()).unwrap();
                assert!(Arc::ptr_eq(&codec, &expected));
            }
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap();
    }
}

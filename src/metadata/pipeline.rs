use bson::Document;

use crate::config::MetadataConfiguration;
use crate::metadata::context::{read_request_metadata, write_request_metadata, OperationContext};
use crate::metadata::error::MetadataResult;
use crate::metadata::hooks::MetadataHooks;
use crate::metadata::make_empty_metadata;
use crate::metadata::reply::{upconvert_reply_metadata, CommandReplyWithMetadata};
use crate::metadata::request::{
    downconvert_request_metadata_with, upconvert_request_metadata, LegacyCommandAndFlags,
};

/// Ingress of a legacy request: strips the metadata off the command and loads it
/// into `context`. Returns the command, ready for dispatch.
pub fn accept_legacy_request<C>(
    legacy_cmd: Document,
    query_flags: u32,
    context: &mut C,
) -> MetadataResult<Document>
where
    C: OperationContext + ?Sized,
{
    let (command, metadata) = upconvert_request_metadata(legacy_cmd, query_flags)?;
    read_request_metadata(context, &metadata)?;
    Ok(command)
}

/// Egress of a request to a legacy peer: metadata from `context`, then every
/// registered writer, folded into the command and `base_flags`.
pub fn prepare_legacy_request<C>(
    command: Document,
    context: &C,
    hooks: &MetadataHooks,
    base_flags: u32,
    config: &MetadataConfiguration,
) -> MetadataResult<LegacyCommandAndFlags>
where
    C: OperationContext + ?Sized,
{
    let mut metadata = make_empty_metadata();
    write_request_metadata(context, &mut metadata)?;
    let metadata = hooks.run_request_writers(&metadata)?;
    downconvert_request_metadata_with(command, metadata, base_flags, config)
}

/// Receipt of a legacy reply from `remote`: splits off the metadata and hands it to
/// every registered reader.
pub fn accept_legacy_reply(
    legacy_reply: Document,
    remote: &str,
    hooks: &MetadataHooks,
) -> MetadataResult<CommandReplyWithMetadata> {
    let (reply, metadata) = upconvert_reply_metadata(legacy_reply)?;
    hooks.run_reply_readers(&metadata, remote)?;
    Ok((reply, metadata))
}

#[cfg(test)]
mod pipeline_tests {
    use std::sync::{Arc, Mutex};

    use crate::config::MetadataConfiguration;
    use crate::metadata::context::{OperationContext, RequestMetadata};
    use crate::metadata::error::{MetadataError, MetadataErrorKind};
    use crate::metadata::hooks::MetadataHooks;
    use crate::metadata::pipeline::{
        accept_legacy_reply, accept_legacy_request, prepare_legacy_request,
    };

    #[derive(Default)]
    struct TestOperation {
        metadata: RequestMetadata,
    }

    impl OperationContext for TestOperation {
        fn request_metadata(&self) -> &RequestMetadata {
            &self.metadata
        }

        fn set_request_metadata(&mut self, metadata: RequestMetadata) {
            self.metadata = metadata;
        }
    }

    #[test]
    fn test_accept_legacy_request() {
        let mut operation = TestOperation::default();
        let command = accept_legacy_request(
            doc! { "find": "c", "maxTimeMS": 100, "filter": {} },
            0x04,
            &mut operation,
        )
        .unwrap();
        assert_eq!(command, doc! { "find": "c", "filter": {} });
        assert!(operation.metadata.secondary_ok);
        assert_eq!(operation.metadata.max_time_ms, Some(100));
    }

    #[test]
    fn test_forward_request_to_legacy_peer() {
        let mut operation = TestOperation::default();
        let command = accept_legacy_request(
            doc! { "count": "c", "$readPreference": { "mode": "secondary" } },
            0x04,
            &mut operation,
        )
        .unwrap();

        let mut hooks = MetadataHooks::new();
        hooks.register_request_writer(|metadata| {
            metadata.insert("$maxTimeMS", 20);
            Ok(())
        });

        let (legacy, flags) = prepare_legacy_request(
            command,
            &operation,
            &hooks,
            0x10,
            &MetadataConfiguration::default(),
        )
        .unwrap();
        assert_eq!(
            legacy,
            doc! { "count": "c", "$readPreference": { "mode": "secondary" }, "maxTimeMS": 20 }
        );
        assert_eq!(flags, 0x14);
    }

    #[test]
    fn test_prepare_fails_when_a_writer_fails() {
        let mut hooks = MetadataHooks::new();
        hooks.register_request_writer(|_| Err(MetadataError::hook_failure("denied")));
        let error = prepare_legacy_request(
            doc! { "ping": 1 },
            &TestOperation::default(),
            &hooks,
            0,
            &MetadataConfiguration::default(),
        )
        .unwrap_err();
        assert_eq!(error.kind(), MetadataErrorKind::HookFailure);
    }

    #[test]
    fn test_accept_legacy_reply() {
        let seen = Arc::new(Mutex::new(None));
        let slot = seen.clone();
        let mut hooks = MetadataHooks::new();
        hooks.register_reply_reader(move |metadata, remote| {
            *slot.lock().unwrap() = Some((metadata.clone(), remote.to_string()));
            Ok(())
        });

        let (reply, metadata) = accept_legacy_reply(
            doc! { "ok": 1.0, "$gleStats": { "electionId": "x" } },
            "rs0/db2:27017",
            &hooks,
        )
        .unwrap();
        assert_eq!(reply, doc! { "ok": 1.0 });
        assert_eq!(
            *seen.lock().unwrap(),
            Some((metadata, "rs0/db2:27017".to_string()))
        );
    }

    #[test]
    fn test_prepare_rejects_unrepresentable_time_limit() {
        let operation = TestOperation {
            metadata: RequestMetadata {
                max_time_ms: Some(4_294_967_396),
                ..RequestMetadata::default()
            },
        };
        let error = prepare_legacy_request(
            doc! { "find": "c" },
            &operation,
            &MetadataHooks::new(),
            0,
            &MetadataConfiguration::default(),
        )
        .unwrap_err();
        assert_eq!(
            error,
            MetadataError::OutOfRange {
                field: "$maxTimeMS".to_string(),
                value: 4_294_967_396
            }
        );
    }
}

#[macro_use]
extern crate bson;

use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bson::{Bson, Document};

use librpcmeta::config::MetadataConfiguration;
use librpcmeta::metadata::error::{MetadataError, MetadataErrorKind};
use librpcmeta::metadata::hooks::MetadataHooks;
use librpcmeta::metadata::make_empty_metadata;
use librpcmeta::metadata::reply::{downconvert_reply_metadata, upconvert_reply_metadata};
use librpcmeta::metadata::request::{
    downconvert_request_metadata, downconvert_request_metadata_with, upconvert_request_metadata,
};
use librpcmeta::ops::msg_header::MsgHeader;
use librpcmeta::ops::op::{parse_mongo_message, serialize_mongo_message, MongoOp};
use librpcmeta::ops::op_query::OpQuery;
use librpcmeta::ops::opcodes::MongoOpCode;
use librpcmeta::ops::transformer::{op_command_to_op_query, op_query_to_op_command};

fn legacy_commands() -> Vec<Document> {
    vec![
        doc! { "ping": 1 },
        doc! { "find": "users", "$readPreference": { "mode": "secondary" } },
        doc! {
            "count": "c",
            "query": { "a": { "$gt": 3 } },
            "maxTimeMS": Bson::FloatingPoint(25.0)
        },
        doc! {
            "aggregate": "orders",
            "pipeline": [{ "$match": { "status": "A" } }],
            "cursor": {},
            "$readPreference": { "mode": "nearest", "maxStalenessSeconds": 120 },
            "$impersonatedUsers": [{ "user": "carol", "db": "admin" }],
            "$impersonatedRoles": [{ "role": "readWrite", "db": "shop" }],
            "maxTimeMS": 0
        },
    ]
}

#[test]
fn request_round_trip_is_exact() -> Result<(), Box<dyn Error>> {
    for legacy in legacy_commands() {
        for flags in [0u32, 0x04].iter() {
            let (command, metadata) = upconvert_request_metadata(legacy.clone(), *flags)?;
            let (round_tripped, round_tripped_flags) =
                downconvert_request_metadata(command, metadata)?;
            assert_eq!(round_tripped, legacy);
            assert_eq!(round_tripped_flags, *flags);
        }
    }
    Ok(())
}

#[test]
fn unrelated_flag_bits_survive() -> Result<(), Box<dyn Error>> {
    let config = MetadataConfiguration::default();
    for bits in [0x02u32, 0x20, 0x80, 0xdead_beef, 0x7fff_fffb].iter() {
        for secondary_ok in [false, true].iter() {
            let flags = if *secondary_ok { bits | 0x04 } else { bits & !0x04 };
            let (command, metadata) = upconvert_request_metadata(doc! { "ping": 1 }, flags)?;
            let (_, round_tripped_flags) =
                downconvert_request_metadata_with(command, metadata, flags, &config)?;
            assert_eq!(round_tripped_flags, flags);
        }
    }
    Ok(())
}

#[test]
fn empty_metadata_is_identity() -> Result<(), Box<dyn Error>> {
    let config = MetadataConfiguration::default();
    for command in legacy_commands() {
        let (legacy, flags) = downconvert_request_metadata_with(
            command.clone(),
            make_empty_metadata(),
            0xffff_ffff,
            &config,
        )?;
        assert_eq!(legacy, command);
        assert_eq!(flags, 0xffff_fffb);
    }

    let (command, metadata) = upconvert_request_metadata(doc! { "dbStats": 1, "scale": 1024 }, 0)?;
    assert_eq!(command, doc! { "dbStats": 1, "scale": 1024 });
    assert_eq!(metadata, make_empty_metadata());
    Ok(())
}

#[test]
fn read_preference_is_isolated() -> Result<(), Box<dyn Error>> {
    let legacy = doc! {
        "distinct": "c",
        "$readPreference": { "mode": "secondary" },
        "key": "k",
        "query": {}
    };
    let (command, metadata) = upconvert_request_metadata(legacy, 0)?;
    assert_eq!(command, doc! { "distinct": "c", "key": "k", "query": {} });
    assert_eq!(metadata.get_document("$readPreference").unwrap(), &doc! { "mode": "secondary" });
    Ok(())
}

#[test]
fn writers_overwrite_in_order_and_stop_on_failure() {
    let mut hooks = MetadataHooks::new();
    hooks.register_request_writer(|metadata| {
        metadata.insert("a", 1);
        Ok(())
    });
    hooks.register_request_writer(|metadata| {
        metadata.insert("a", 2);
        Ok(())
    });
    let metadata = hooks.run_request_writers(&make_empty_metadata()).unwrap();
    assert_eq!(metadata, doc! { "a": 2 });

    let second_ran = Arc::new(AtomicBool::new(false));
    let flag = second_ran.clone();
    let mut failing = MetadataHooks::new();
    failing.register_request_writer(|_| Err(MetadataError::hook_failure("w1")));
    failing.register_request_writer(move |metadata| {
        flag.store(true, Ordering::SeqCst);
        metadata.insert("a", 2);
        Ok(())
    });
    let error = failing.run_request_writers(&make_empty_metadata()).unwrap_err();
    assert_eq!(error.kind(), MetadataErrorKind::HookFailure);
    assert!(!second_ran.load(Ordering::SeqCst));
}

#[test]
fn malformed_max_time_fails() {
    let error = upconvert_request_metadata(doc! { "find": "c", "maxTimeMS": "100" }, 0x04)
        .unwrap_err();
    assert_eq!(error.kind(), MetadataErrorKind::MalformedField);
}

#[test]
fn reply_round_trip_is_exact() -> Result<(), Box<dyn Error>> {
    let replies = vec![
        doc! { "ok": 1.0, "$gleStats": { "lastOpTime": Bson::TimeStamp(1), "electionId": "x" } },
        doc! { "n": 0, "$gleStats": {}, "ok": 1.0 },
    ];
    for legacy in replies {
        let (reply, metadata) = upconvert_reply_metadata(legacy.clone())?;
        assert!(!reply.contains_key("$gleStats"));
        let round_tripped = downconvert_reply_metadata(reply, metadata)?;
        // $gleStats is appended last
        let mut expected = legacy.clone();
        let gle_stats = expected.remove("$gleStats").unwrap();
        expected.insert("$gleStats", gle_stats);
        assert_eq!(round_tripped, expected);
    }
    Ok(())
}

#[test]
fn legacy_command_message_survives_the_canonical_form() -> Result<(), Box<dyn Error>> {
    let op_query = OpQuery {
        message_header: MsgHeader {
            message_length: 0,
            request_id: 1001,
            response_to: 0,
            op_code: MongoOpCode::OpQuery,
        },
        flags: 0x04,
        full_collection_name: "shop.$cmd".to_string(),
        number_to_skip: 0,
        number_to_return: 1,
        query: doc! {
            "find": "orders",
            "filter": { "total": { "$gte": 100 } },
            "$readPreference": { "mode": "secondaryPreferred" },
            "maxTimeMS": 2000
        },
        return_fields_selector: None,
    };
    let bytes = serialize_mongo_message(&MongoOp::Query(op_query.clone()))?;

    let parsed = match parse_mongo_message(&bytes)? {
        MongoOp::Query(parsed) => parsed,
        other => panic!("unexpected {:?}", other),
    };
    let op_command = op_query_to_op_command(parsed)?;
    assert_eq!(op_command.command_name, "find");
    assert_eq!(op_command.metadata.get_bool("$secondaryOk").unwrap(), true);

    let command_bytes = serialize_mongo_message(&MongoOp::Command(op_command))?;
    let op_command = match parse_mongo_message(&command_bytes)? {
        MongoOp::Command(op_command) => op_command,
        other => panic!("unexpected {:?}", other),
    };
    let legacy = op_command_to_op_query(op_command, &MetadataConfiguration::default())?;
    assert_eq!(legacy.query, op_query.query);
    assert_eq!(legacy.flags, op_query.flags);
    assert_eq!(legacy.full_collection_name, op_query.full_collection_name);
    assert_eq!(serialize_mongo_message(&MongoOp::Query(legacy))?, bytes);
    Ok(())
}

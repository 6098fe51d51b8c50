use std::mem::size_of;

use bson::Document;

use crate::ops::error::{WireParserError, WireSerializeError};
use crate::utils::{u32_to_u8_array, u64_to_u8_array, u8_array_to_u32, u8_array_to_u64};

pub fn parse_u32(buffer: &[u8]) -> Result<(u32, &[u8]), WireParserError> {
    if buffer.len() < size_of::<u32>() {
        return Err(WireParserError::NotEnoughBufferSize);
    }
    let value = u8_array_to_u32(&[buffer[0], buffer[1], buffer[2], buffer[3]]);
    Ok((value, &buffer[size_of::<u32>()..]))
}

pub fn parse_u64(buffer: &[u8]) -> Result<(u64, &[u8]), WireParserError> {
    if buffer.len() < size_of::<u64>() {
        return Err(WireParserError::NotEnoughBufferSize);
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buffer[..size_of::<u64>()]);
    Ok((u8_array_to_u64(&bytes), &buffer[size_of::<u64>()..]))
}

pub fn parse_cstring(buffer: &[u8]) -> Result<(String, &[u8]), WireParserError> {
    match buffer.iter().position(|&byte| byte == b'\0') {
        None => Err(WireParserError::NoZeroTrailingInCstringBuffer),
        Some(terminal_index) => match std::str::from_utf8(&buffer[..terminal_index]) {
            Err(_) => Err(WireParserError::CstringNotUtf8),
            Ok(value) => Ok((value.to_string(), &buffer[terminal_index + 1..])),
        },
    }
}

pub fn parse_bson_document(buffer: &[u8]) -> Result<(Document, &[u8]), WireParserError> {
    let (bson_size, _) = parse_u32(buffer)?;
    let document_end = bson_size as usize;
    // The smallest document is its length prefix plus the terminating zero.
    if document_end < 5 {
        return Err(WireParserError::InvalidDocumentLength(bson_size));
    }
    if document_end > buffer.len() {
        return Err(WireParserError::NotEnoughBufferSize);
    }
    match bson::decode_document(&mut &buffer[..document_end]) {
        Err(error) => Err(WireParserError::ParseBsonError(error)),
        Ok(document) => Ok((document, &buffer[document_end..])),
    }
}

/// Reads documents until the buffer is exhausted.
pub fn parse_bson_documents(mut buffer: &[u8]) -> Result<Vec<Document>, WireParserError> {
    let mut documents = vec![];
    while !buffer.is_empty() {
        let (document, next_buffer) = parse_bson_document(buffer)?;
        documents.push(document);
        buffer = next_buffer;
    }
    Ok(documents)
}

pub fn serialize_u32(buffer: &mut Vec<u8>, value: u32) {
    buffer.extend_from_slice(&u32_to_u8_array(value));
}

pub fn serialize_u64(buffer: &mut Vec<u8>, value: u64) {
    buffer.extend_from_slice(&u64_to_u8_array(value));
}

pub fn serialize_cstring(buffer: &mut Vec<u8>, value: &str) -> Result<(), WireSerializeError> {
    if value.as_bytes().contains(&b'\0') {
        return Err(WireSerializeError::CstringContainZeroByte(value.to_string()));
    }
    buffer.extend_from_slice(value.as_bytes());
    buffer.push(b'\0');
    Ok(())
}

pub fn serialize_bson_document(
    buffer: &mut Vec<u8>,
    document: &Document,
) -> Result<(), WireSerializeError> {
    match bson::encode_document(buffer, document) {
        Err(error) => Err(WireSerializeError::SerializeBsonError(error)),
        Ok(_) => Ok(()),
    }
}

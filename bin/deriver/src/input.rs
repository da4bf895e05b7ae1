//! Loading of RPC data from disk.

use crate::error::{DeriverError, DeriverResult};
use serde::{Deserialize, de::DeserializeOwned};
use std::path::Path;

/// A JSON document holding an RPC result, bare or wrapped in its response.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RpcDocument<T> {
    Response(RpcResponse<T>),
    Bare(T),
}

/// A JSON-RPC 2.0 response.
#[derive(Deserialize, Debug)]
struct RpcResponse<T> {
    #[serde(rename = "jsonrpc")]
    _version: String,
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize, Debug)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Reads the RPC result stored at `path`.
pub(crate) fn read_rpc<T: DeserializeOwned>(path: &Path) -> DeriverResult<T> {
    let raw = std::fs::read(path)
        .map_err(|source| DeriverError::Read { path: path.to_path_buf(), source })?;
    parse_rpc(&raw, path)
}

/// Reads a JSON value stored at `path`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> DeriverResult<T> {
    let raw = std::fs::read(path)
        .map_err(|source| DeriverError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_slice(&raw)
        .map_err(|source| DeriverError::Parse { path: path.to_path_buf(), source })
}

fn parse_rpc<T: DeserializeOwned>(raw: &[u8], path: &Path) -> DeriverResult<T> {
    let document = serde_json::from_slice::<RpcDocument<T>>(raw)
        .map_err(|source| DeriverError::Parse { path: path.to_path_buf(), source })?;

    match document {
        RpcDocument::Bare(result) => Ok(result),
        RpcDocument::Response(RpcResponse { error: Some(error), .. }) => Err(DeriverError::Rpc {
            path: path.to_path_buf(),
            code: error.code,
            message: error.message,
        }),
        RpcDocument::Response(RpcResponse { result: Some(result), .. }) => Ok(result),
        RpcDocument::Response(_) => Err(DeriverError::EmptyResult(path.to_path_buf())),
    }
}

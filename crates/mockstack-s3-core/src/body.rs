//! Request body normalization.

use bytes::{Bytes, BytesMut};
use futures::TryStreamExt;
use mockstack_s3_model::{RequestBody, S3Error};

/// Drain a request body into one contiguous buffer.
///
/// Byte and text bodies are returned as-is. Streams are read to the end;
/// a failing chunk aborts the read with `InternalError`.
pub async fn collect_body(body: RequestBody) -> Result<Bytes, S3Error> {
    match body {
        RequestBody::Bytes(data) => Ok(data),
        RequestBody::Text(text) => Ok(Bytes::from(text)),
        RequestBody::Stream(stream) => {
            let data = stream
                .try_fold(BytesMut::new(), |mut acc, chunk| async move {
                    acc.extend_from_slice(&chunk);
                    Ok(acc)
                })
                .await
                .map_err(|e| {
                    S3Error::internal_error(format!("Failed to read request body: {e}"))
                        .with_source(e)
                })?;
            Ok(data.freeze())
        }
    }
}

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream as AwsByteStream, Client};
use bytes::Bytes;

use crate::{Backend, BlobError, BlobResult, BlobStore, PutResult, RemoteConfig};

/// S3-compatible object store keyed by identity
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Build a client from a complete remote configuration.
    ///
    /// No request is sent; a bucket that is unreachable surfaces on the
    /// first put/get and is handled by the router's fallback.
    pub async fn connect(config: &RemoteConfig) -> BlobResult<Self> {
        if config.bucket.trim().is_empty() {
            return Err(BlobError::invalid("S3 bucket name is empty"));
        }

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "docdrop",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let sdk_config = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if config.endpoint_url.is_some() {
            // Path-style addressing for MinIO/RustFS style endpoints
            builder = builder.force_path_style(true);
        }

        Ok(Self::from_client(Client::from_conf(builder.build()), config.bucket.clone()))
    }

    pub fn from_client(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl BlobStore for S3Store {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> BlobResult<PutResult> {
        let size_bytes = data.len() as u64;

        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(AwsByteStream::from(data))
            .send()
            .await
            .map_err(BlobError::backend)?;

        Ok(PutResult {
            etag: result.e_tag().map(str::to_string),
            size_bytes,
        })
    }

    async fn get(&self, key: &str) -> BlobResult<Bytes> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    return Err(BlobError::not_found(key));
                }
                return Err(BlobError::backend(err));
            }
        };

        let body = output.body.collect().await.map_err(BlobError::backend)?;
        Ok(body.into_bytes())
    }

    fn backend(&self) -> Backend {
        Backend::Remote
    }
}

//! MinIO/S3-compatible implementation of [`MediaStorage`]
//!
//! Every object lives under the configured public prefix and is served
//! straight from the public endpoint; the bucket gets an anonymous-read
//! policy on that prefix at startup.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use tracing::{debug, info, warn};

use super::sigv4::SigV4Signer;
use super::MediaStorage;
use crate::core::config::MinIOConfig;
use crate::core::error::{AppError, Result};

pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    config: MinIOConfig,
    http_client: Client,
}

impl MinIOClient {
    /// Connect, create the bucket when missing and open the public prefix for reads
    pub async fn new(config: MinIOConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to open MinIO bucket: {}", e)))?;
        // MinIO wants http://endpoint/bucket rather than http://bucket.endpoint
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let client = Self {
            bucket,
            region,
            credentials,
            config,
            http_client,
        };

        client.ensure_bucket().await;
        client.open_public_prefix().await;

        info!(
            "MinIO media storage ready: endpoint={}, bucket={}, prefix={}",
            client.config.endpoint,
            client.bucket.name(),
            client.config.public_prefix
        );

        Ok(client)
    }

    async fn ensure_bucket(&self) {
        let name = self.bucket.name();
        let created = Bucket::create_with_path_style(
            &name,
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match created {
            Ok(_) => info!("Bucket '{}' created", name),
            Err(e) => {
                let message = e.to_string();
                if message.contains("BucketAlreadyOwnedByYou")
                    || message.contains("BucketAlreadyExists")
                {
                    debug!("Bucket '{}' already exists", name);
                } else {
                    warn!("Could not create bucket '{}': {}. Assuming it exists.", name, e);
                }
            }
        }
    }

    /// Anonymous `s3:GetObject` on `{bucket}/{public_prefix}/*`. Failure only warns:
    /// the policy can also be set with `mc anonymous set download`.
    async fn open_public_prefix(&self) {
        let name = self.bucket.name();
        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Principal": {"AWS": "*"},
                "Action": ["s3:GetObject"],
                "Resource": [format!("arn:aws:s3:::{}/{}/*", name, self.config.public_prefix)]
            }]
        })
        .to_string();

        if let Err(e) = self.put_bucket_policy(&name, &policy).await {
            warn!("Failed to set read policy on bucket '{}': {}", name, e);
        } else {
            info!("Public read enabled for {}/{}/*", name, self.config.public_prefix);
        }
    }

    async fn put_bucket_policy(&self, bucket_name: &str, policy: &str) -> Result<()> {
        let endpoint = Url::parse(&self.config.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid MinIO endpoint: {}", e)))?;
        let host = endpoint
            .host_str()
            .ok_or_else(|| AppError::Internal("MinIO endpoint has no host".to_string()))?;
        let host = match endpoint.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let signer = SigV4Signer {
            access_key: &self.config.access_key,
            secret_key: &self.config.secret_key,
            region: &self.config.region,
        };
        let signed = signer.sign(
            "PUT",
            &host,
            &format!("/{}", bucket_name),
            "policy=",
            policy.as_bytes(),
            Utc::now(),
        )?;

        let response = self
            .http_client
            .put(format!("{}/{}?policy", self.config.endpoint, bucket_name))
            .header("Host", &host)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.content_sha256)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Bucket policy request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Internal(format!(
            "Bucket policy rejected: {} - {}",
            status, body
        )))
    }

    fn object_key(&self, path: &str) -> String {
        format!("{}/{}", self.config.public_prefix, path.trim_start_matches('/'))
    }

    fn public_base(&self) -> String {
        format!("{}/{}/", self.config.public_endpoint, self.bucket.name())
    }

    /// Keys may carry `%` from url-encoded owners, so each segment is escaped again
    fn public_url(&self, key: &str) -> String {
        let escaped: Vec<String> = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}{}", self.public_base(), escaped.join("/"))
    }

    /// Object key for a URL this client produced; `None` for foreign URLs
    fn key_from_url(&self, url: &str) -> Option<String> {
        let public = self.public_base();
        let internal = format!("{}/{}/", self.config.endpoint, self.bucket.name());
        let escaped = url
            .strip_prefix(public.as_str())
            .or_else(|| url.strip_prefix(internal.as_str()))?;
        urlencoding::decode(escaped).ok().map(|key| key.into_owned())
    }
}

#[async_trait]
impl MediaStorage for MinIOClient {
    async fn store(&self, data: Vec<u8>, path: &str, content_type: &str) -> Result<String> {
        let key = self.object_key(path);

        self.bucket
            .put_object_with_content_type(&key, &data, content_type)
            .await
            .map_err(|e| {
                tracing::error!("Failed to upload '{}': {:?}", key, e);
                AppError::BackendUnavailable(format!("Failed to upload '{}'", key))
            })?;

        debug!("Stored {} bytes at '{}'", data.len(), key);
        Ok(self.public_url(&key))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let key = self
            .key_from_url(url)
            .ok_or_else(|| AppError::BadRequest(format!("Not a media URL: {}", url)))?;

        self.bucket.delete_object(&key).await.map_err(|e| {
            tracing::error!("Failed to delete '{}': {:?}", key, e);
            AppError::BackendUnavailable(format!("Failed to delete '{}'", key))
        })?;

        debug!("Deleted '{}'", key);
        Ok(())
    }
}

//! Bearer-token minting for the EKS API server.
//!
//! Follows the `aws eks get-token` scheme: a presigned STS GetCallerIdentity
//! URL with the cluster name bound through the `x-k8s-aws-id` signed header,
//! encoded as `k8s-aws-v1.` plus the unpadded URL-safe base64 of the URL.

use std::time::{Duration, SystemTime};

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    sign, SignableBody, SignableRequest, SignatureLocation, SigningSettings,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

pub const TOKEN_PREFIX: &str = "k8s-aws-v1.";
pub const CLUSTER_ID_HEADER: &str = "x-k8s-aws-id";

const TOKEN_TTL: Duration = Duration::from_secs(60);

pub fn bearer_token(
    credentials: &Credentials,
    region: &str,
    cluster_name: &str,
    now: SystemTime,
) -> Result<String, String> {
    let identity = Identity::from(credentials.clone());

    let mut settings = SigningSettings::default();
    settings.signature_location = SignatureLocation::QueryParams;
    settings.expires_in = Some(TOKEN_TTL);

    let params = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name("sts")
        .time(now)
        .settings(settings)
        .build()
        .map_err(|error| format!("failed to build signing parameters: {error}"))?
        .into();

    let url =
        format!("https://sts.{region}.amazonaws.com/?Action=GetCallerIdentity&Version=2011-06-15");
    let signable = SignableRequest::new(
        "GET",
        url.clone(),
        std::iter::once((CLUSTER_ID_HEADER, cluster_name)),
        SignableBody::Bytes(&[]),
    )
    .map_err(|error| format!("failed to build signable request: {error}"))?;

    let (instructions, _signature) = sign(signable, &params)
        .map_err(|error| format!("failed to presign sts request: {error}"))?
        .into_parts();

    let mut request = http::Request::builder()
        .method("GET")
        .uri(&url)
        .header(CLUSTER_ID_HEADER, cluster_name)
        .body(())
        .map_err(|error| format!("failed to build sts request: {error}"))?;
    instructions.apply_to_request_http1x(&mut request);

    Ok(format!(
        "{TOKEN_PREFIX}{}",
        URL_SAFE_NO_PAD.encode(request.uri().to_string())
    ))
}

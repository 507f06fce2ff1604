// Copyright (C) 2017-2018 Red Hat, Inc.
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.
//
// Author: Gris Ge <fge@redhat.com>

use std::time::Duration;

use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};
use url::Url;

use super::client::ClientOptions;
use super::error::*;
use super::request::{envelope, OperationRequest};
use super::result::{decode, OperationResult, ResultKind};

static SERVLET_PATH: &'static str =
    "/servlets/netapp.servlets.admin.XMLrequest_filer";
static CONTENT_TYPE_XML: &'static str = "text/xml; charset=utf-8";

/// HTTP reply as received from the filer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Header name and value pairs, names in lower case.
    pub headers: Vec<(String, String)>,
    /// Body, lossily converted to UTF-8.
    pub body: String,
}

impl RawResponse {
    fn read(resp: Response) -> Result<RawResponse> {
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = String::from_utf8_lossy(&resp.bytes()?).into_owned();
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Decoded result together with the HTTP response it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<R> {
    pub result: R,
    pub response: RawResponse,
}

pub(crate) struct TransPort {
    http: HttpClient,
    url: Url,
    version: String,
    user: Option<String>,
    password: Option<String>,
}

impl TransPort {
    pub(crate) fn new(
        base_url: &str,
        version: &str,
        opts: &ClientOptions,
    ) -> Result<TransPort> {
        let base = Url::parse(base_url)?;
        match base.scheme() {
            "http" | "https" => (),
            s => {
                return Err(OntapError::InvalidArgument(format!(
                    "Unsupported URL scheme '{}' in '{}', should be http or \
                     https",
                    s, base_url
                )))
            }
        };
        let url = base.join(SERVLET_PATH)?;
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(opts.timeout_ms))
            .danger_accept_invalid_certs(!opts.ssl_verify)
            .user_agent(opts.user_agent.as_str())
            .build()?;
        Ok(TransPort {
            http,
            url,
            version: version.to_string(),
            user: opts.basic_auth_user.clone(),
            password: opts.basic_auth_password.clone(),
        })
    }

    pub(crate) fn url(&self) -> &Url {
        &self.url
    }

    pub(crate) fn version(&self) -> &str {
        &self.version
    }

    fn send(&self, body: Vec<u8>) -> Result<RawResponse> {
        let mut req = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, CONTENT_TYPE_XML)
            .body(body);
        if let Some(ref user) = self.user {
            req = req.basic_auth(user, self.password.as_ref());
        }
        let resp = RawResponse::read(req.send()?)?;
        match resp.status {
            200..=299 => Ok(resp),
            401 | 403 => {
                warn!(
                    status = resp.status,
                    url = %self.url,
                    "filer refused credentials"
                );
                Err(OntapError::PermissionDenied {
                    message: format!(
                        "Filer {} refused the request with HTTP status {}",
                        self.url, resp.status
                    ),
                    response: resp,
                })
            }
            _ => {
                warn!(
                    status = resp.status,
                    url = %self.url,
                    "unexpected HTTP status from filer"
                );
                Err(OntapError::HttpStatus {
                    message: format!(
                        "Filer {} replied with HTTP status {}",
                        self.url, resp.status
                    ),
                    response: resp,
                })
            }
        }
    }

    pub(crate) fn invoke(
        &self,
        vserver: Option<&str>,
        req: &OperationRequest,
        kind: ResultKind,
    ) -> Result<Reply<OperationResult>> {
        debug!(
            operation = req.name(),
            vserver = vserver.unwrap_or(""),
            url = %self.url,
            "invoking ONTAP API"
        );
        let body = envelope(req, &self.version, vserver)?;
        let response = self.send(body)?;
        match decode(kind, &response.body) {
            Ok(result) => {
                debug!(
                    operation = req.name(),
                    passed = result.passed(),
                    error_code = result.error_code(),
                    "got ONTAP reply"
                );
                Ok(Reply { result, response })
            }
            Err(e) => {
                warn!(
                    operation = req.name(),
                    error = %e,
                    "undecodable ONTAP reply"
                );
                Err(OntapError::TransportSerialization {
                    message: format!(
                        "Failed to decode {:?} reply of operation '{}': {}",
                        kind,
                        req.name(),
                        e
                    ),
                    response,
                })
            }
        }
    }
}

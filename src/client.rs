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

use url::Url;

use super::data::*;
use super::error::*;
use super::misc::{verify_initiator_group, verify_lun_path, verify_volume_size};
use super::request::OperationRequest;
use super::result::{AsyncResult, OperationResult, ResultKind, SingleResult};
use super::transport::{Reply, TransPort};

/// ONTAP API version used when none is specified.
pub const DEFAULT_API_VERSION: &str = "1.10";
const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// HTTP level settings of a [`Client`][1].
///
/// Can be deserialized from a configuration file, missing fields take
/// their default value.
///
/// [1]: struct.Client.html
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientOptions {
    /// HTTP basic authentication user name.
    pub basic_auth_user: Option<String>,
    /// HTTP basic authentication password.
    pub basic_auth_password: Option<String>,
    /// Verify the TLS certificate of the filer. Default is `true`.
    pub ssl_verify: bool,
    /// Timeout in milliseconds of each request.
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            basic_auth_user: None,
            basic_auth_password: None,
            ssl_verify: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: format!("ontap-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Represent the connection to a filer.
///
/// Each method is a single blocking HTTP round trip. A `Client` can be
/// shared between threads.
pub struct Client {
    tp: TransPort,
}

trait IntoReply<T> {
    fn into_reply(self) -> Result<Reply<T>>;
}

impl IntoReply<SingleResult> for Reply<OperationResult> {
    fn into_reply(self) -> Result<Reply<SingleResult>> {
        match self.result {
            OperationResult::Single(result) => Ok(Reply {
                result,
                response: self.response,
            }),
            OperationResult::Async(_) => Err(OntapError::LibBug(
                "Expecting single result, but got async one".to_string(),
            )),
        }
    }
}

impl IntoReply<AsyncResult> for Reply<OperationResult> {
    fn into_reply(self) -> Result<Reply<AsyncResult>> {
        match self.result {
            OperationResult::Async(result) => Ok(Reply {
                result,
                response: self.response,
            }),
            OperationResult::Single(_) => Err(OntapError::LibBug(
                "Expecting async result, but got single one".to_string(),
            )),
        }
    }
}

impl Client {
    /// Create a client for the filer at `base_url`, e.g.
    /// `https://filer.example.com`.
    ///
    /// The `version` is the ONTAP API version, use
    /// [`DEFAULT_API_VERSION`][1] if unsure. No network traffic happens
    /// here.
    ///
    /// # Errors
    ///
    ///  * [`OntapError::InvalidArgument`][2]: `base_url` is not a valid
    ///    http or https URL.
    ///
    /// [1]: constant.DEFAULT_API_VERSION.html
    /// [2]: enum.OntapError.html#variant.InvalidArgument
    pub fn new(
        base_url: &str,
        version: &str,
        options: Option<ClientOptions>,
    ) -> Result<Client> {
        let options = options.unwrap_or_default();
        let tp = TransPort::new(base_url, version, &options)?;
        Ok(Client { tp })
    }

    /// URL every request is posted to.
    pub fn url(&self) -> &Url {
        self.tp.url()
    }

    /// ONTAP API version sent in every request.
    pub fn version(&self) -> &str {
        self.tp.version()
    }

    /// Send any operation and decode the reply as `kind`.
    ///
    /// The vserver, if any, receives the request through vserver
    /// tunneling.
    ///
    /// A failed operation is not an error: check
    /// [`OperationResult::passed()`][1]. Errors are transport failures,
    /// non-2xx HTTP status and undecodable replies.
    ///
    /// [1]: enum.OperationResult.html#method.passed
    pub fn invoke(
        &self,
        vserver: Option<&str>,
        req: &OperationRequest,
        kind: ResultKind,
    ) -> Result<Reply<OperationResult>> {
        self.tp.invoke(vserver, req, kind)
    }

    /// Send a synchronous operation.
    pub fn invoke_single(
        &self,
        vserver: Option<&str>,
        req: &OperationRequest,
    ) -> Result<Reply<SingleResult>> {
        self.invoke(vserver, req, ResultKind::Single)?.into_reply()
    }

    /// Send an operation which queues a job on the filer.
    pub fn invoke_async(
        &self,
        vserver: Option<&str>,
        req: &OperationRequest,
    ) -> Result<Reply<AsyncResult>> {
        self.invoke(vserver, req, ResultKind::Async)?.into_reply()
    }

    /// Create a new LUN.
    ///
    ///  * `vserver` -- The vserver owning the volume. Empty string for
    ///    none.
    ///  * `options` -- LUN properties, see [`LunCreateOptions`][1].
    ///
    /// # Errors
    ///
    ///  * [`OntapError::InvalidArgument`][2]: `options.path` is set but is
    ///    not a valid LUN path.
    ///
    /// [1]: struct.LunCreateOptions.html
    /// [2]: enum.OntapError.html#variant.InvalidArgument
    pub fn lun_create(
        &self,
        vserver: &str,
        options: &LunCreateOptions,
    ) -> Result<Reply<SingleResult>> {
        if !options.path.is_empty() {
            verify_lun_path(&options.path)?;
        }
        self.invoke_single(Some(vserver), &options.request()?)
    }

    /// Grant access to a LUN for the specified initiator group, also known
    /// as LUN mapping or masking.
    ///
    ///  * `lun_id` -- LUN ID seen by the initiators. For `None`, the filer
    ///    picks the lowest free one.
    ///
    /// # Errors
    ///
    ///  * [`OntapError::InvalidArgument`][1]: Invalid LUN path or empty
    ///    initiator group.
    ///
    /// [1]: enum.OntapError.html#variant.InvalidArgument
    pub fn lun_map(
        &self,
        vserver: &str,
        path: &str,
        initiator_group: &str,
        lun_id: Option<u32>,
    ) -> Result<Reply<SingleResult>> {
        verify_lun_path(path)?;
        verify_initiator_group(initiator_group)?;
        let req = OperationRequest::new(LUN_MAP_OPERATION)?
            .required("path", path)
            .required("initiator-group", initiator_group)
            .optional("lun-id", lun_id);
        self.invoke_single(Some(vserver), &req)
    }

    /// Revoke access to a LUN for the specified initiator group.
    pub fn lun_unmap(
        &self,
        vserver: &str,
        path: &str,
        initiator_group: &str,
    ) -> Result<Reply<SingleResult>> {
        verify_lun_path(path)?;
        verify_initiator_group(initiator_group)?;
        let req = OperationRequest::new(LUN_UNMAP_OPERATION)?
            .required("path", path)
            .required("initiator-group", initiator_group);
        self.invoke_single(Some(vserver), &req)
    }

    /// Apply a state change which only takes the LUN path.
    pub fn lun_operation(
        &self,
        vserver: &str,
        path: &str,
        op: LunStateOp,
    ) -> Result<Reply<SingleResult>> {
        verify_lun_path(path)?;
        let req = OperationRequest::new(op.as_str())?.required("path", path);
        self.invoke_single(Some(vserver), &req)
    }

    /// Set a LUN to online.
    pub fn lun_online(
        &self,
        vserver: &str,
        path: &str,
    ) -> Result<Reply<SingleResult>> {
        self.lun_operation(vserver, path, LunStateOp::Online)
    }

    /// Disable the read and write access to the specified LUN.
    pub fn lun_offline(
        &self,
        vserver: &str,
        path: &str,
    ) -> Result<Reply<SingleResult>> {
        self.lun_operation(vserver, path, LunStateOp::Offline)
    }

    /// Delete a LUN. The filer refuses to delete a mapped or online LUN.
    pub fn lun_destroy(
        &self,
        vserver: &str,
        path: &str,
    ) -> Result<Reply<SingleResult>> {
        self.lun_operation(vserver, path, LunStateOp::Destroy)
    }

    /// Resize a volume. The filer queues a job, its ID is in
    /// [`AsyncResult::job_id`][1].
    ///
    ///  * `new_size` -- Absolute size like `10g`, or relative like `+500m`
    ///    and `-1g`.
    ///
    /// [1]: struct.AsyncResult.html#structfield.job_id
    pub fn volume_resize_async(
        &self,
        vserver: &str,
        volume: &str,
        new_size: &str,
    ) -> Result<Reply<AsyncResult>> {
        if volume.is_empty() {
            return Err(OntapError::InvalidArgument(
                "Volume name should not be empty".to_string(),
            ));
        }
        verify_volume_size(new_size)?;
        let req = OperationRequest::new(VOLUME_SIZE_ASYNC_OPERATION)?
            .required("new-size", new_size)
            .required("volume-name", volume);
        self.invoke_async(Some(vserver), &req)
    }
}

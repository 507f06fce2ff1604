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

//! # `ontap`
//!
//! Client of the NetApp ONTAP management API (ONTAPI), the XML over HTTP
//! protocol served by filers at
//! `/servlets/netapp.servlets.admin.XMLrequest_filer`. Supported actions:
//!
//!  * Create, map, unmap, online, offline and destroy LUNs.
//!
//!  * Resize volumes asynchronously.
//!
//!  * Send any other ONTAP operation built with [`OperationRequest`][1].
//!
//! Every call is one blocking HTTP round trip returning either an error
//! (network failure, non-2xx HTTP status, undecodable reply) or a decoded
//! result whose `passed()` tells whether the filer accepted the operation.
//!
//! # Example code
//!
//! ```rust,no_run
//! extern crate ontap;
//! use ontap::{Client, ClientOptions, LunCreateOptions, OntapError};
//! fn main() {
//!     let opts = ClientOptions {
//!         basic_auth_user: Some("admin".to_string()),
//!         basic_auth_password: Some("secret".to_string()),
//!         ..Default::default()
//!     };
//!     let c = Client::new(
//!         "https://filer.example.com",
//!         ontap::DEFAULT_API_VERSION,
//!         Some(opts),
//!     ).unwrap();
//!     let lun = LunCreateOptions {
//!         path: "/vol/vol1/lun1".to_string(),
//!         ostype: "linux".to_string(),
//!         size: ontap::size_human_2_size_bytes("10GiB").unwrap(),
//!         ..Default::default()
//!     };
//!     match c.lun_create("svm1", &lun) {
//!         Ok(reply) => {
//!             if !reply.result.passed() {
//!                 panic!("Filer refused: {}", reply.result.reason);
//!             }
//!         }
//!         Err(OntapError::NetworkConRefused(e)) => {
//!             panic!("Filer is not reachable: {}", e)
//!         }
//!         Err(e) => panic!("{}", e),
//!     };
//!     c.lun_map("svm1", "/vol/vol1/lun1", "igroup1", None).unwrap();
//! }
//! ```
//!
//! [1]: struct.OperationRequest.html

extern crate quick_xml;
extern crate regex;
extern crate reqwest;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate thiserror;
extern crate tracing;
extern crate url;

pub use self::client::{Client, ClientOptions, DEFAULT_API_VERSION};
pub use self::data::*;
pub use self::error::{OntapError, Result};
pub use self::misc::{size_bytes_2_size_human, size_human_2_size_bytes};
pub use self::request::{OperationRequest, Param, ParamValue};
pub use self::result::{
    AsyncResult, OperationResult, ResultKind, SingleResult, ERRNO_UNKNOWN,
};
pub use self::transport::{RawResponse, Reply};

mod client;
mod data;
mod error;
mod misc;
mod request;
mod result;
mod transport;

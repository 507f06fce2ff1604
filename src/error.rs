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

use std::result;

use thiserror::Error;

use super::transport::RawResponse;

#[derive(Debug, Error)]
pub enum OntapError {
    #[error("{0}")]
    LibBug(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    TimeOut(String),
    #[error("{0}")]
    NetworkConRefused(String),
    #[error("{0}")]
    NetworkError(String),
    /// Filer refused the credentials with HTTP 401 or 403.
    #[error("{message}")]
    PermissionDenied {
        message: String,
        response: RawResponse,
    },
    /// Filer answered with a non-2xx HTTP status.
    #[error("{message}")]
    HttpStatus {
        message: String,
        response: RawResponse,
    },
    /// Reply body could not be decoded into the expected result schema.
    /// The raw HTTP response is preserved for inspection.
    #[error("{message}")]
    TransportSerialization {
        message: String,
        response: RawResponse,
    },
}

impl OntapError {
    /// Short, static description of the error kind.
    pub fn kind_str(&self) -> &'static str {
        match *self {
            OntapError::LibBug(_) => "Library bug",
            OntapError::InvalidArgument(_) => "Invalid argument",
            OntapError::TimeOut(_) => "Timeout",
            OntapError::NetworkConRefused(_) => "Network connection refused",
            OntapError::NetworkError(_) => "Network error",
            OntapError::PermissionDenied { .. } => "Permission denied",
            OntapError::HttpStatus { .. } => "Unexpected HTTP status",
            OntapError::TransportSerialization { .. } => {
                "Incorrect transport serialization"
            }
        }
    }

    /// The raw HTTP response, if the filer answered at all.
    pub fn response(&self) -> Option<&RawResponse> {
        match *self {
            OntapError::HttpStatus { ref response, .. }
            | OntapError::PermissionDenied { ref response, .. }
            | OntapError::TransportSerialization { ref response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, OntapError>;

impl From<::reqwest::Error> for OntapError {
    fn from(e: ::reqwest::Error) -> Self {
        if e.is_timeout() {
            OntapError::TimeOut(format!("Request to filer timed out: {}", e))
        } else if e.is_connect() {
            OntapError::NetworkConRefused(format!(
                "Failed to connect to filer: {}",
                e
            ))
        } else if e.is_builder() {
            OntapError::InvalidArgument(format!(
                "Failed to build HTTP client or request: {}",
                e
            ))
        } else {
            OntapError::NetworkError(format!("{}", e))
        }
    }
}

impl From<::quick_xml::Error> for OntapError {
    fn from(e: ::quick_xml::Error) -> Self {
        OntapError::LibBug(format!("Failed to write request XML: {}", e))
    }
}

impl From<::std::io::Error> for OntapError {
    fn from(e: ::std::io::Error) -> Self {
        OntapError::LibBug(format!("Failed to write request XML: {}", e))
    }
}

impl From<::url::ParseError> for OntapError {
    fn from(e: ::url::ParseError) -> Self {
        OntapError::InvalidArgument(format!("Failed to parse URL: {}", e))
    }
}

impl From<::regex::Error> for OntapError {
    fn from(e: ::regex::Error) -> Self {
        OntapError::LibBug(format!("Regex error: {}", e))
    }
}

impl From<::std::string::FromUtf8Error> for OntapError {
    fn from(e: ::std::string::FromUtf8Error) -> Self {
        OntapError::LibBug(format!(
            "Request XML is not a valid UTF-8 string: {}",
            e
        ))
    }
}

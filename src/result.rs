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

use quick_xml::de::{from_str, DeError};
use quick_xml::events::Event;
use quick_xml::Reader;

const NETAPP_ROOT_TAG: &[u8] = b"netapp";
const STATUS_PASSED: &str = "passed";
/// Error code reported when the filer marks the call as not passed but
/// gives no `errno`.
pub const ERRNO_UNKNOWN: i64 = -1;

/// Which reply schema the caller expects. The filer reply carries no
/// discriminator, so this is decided by the operation being invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// Plain `<results status=".." errno=".." reason="..">`.
    Single,
    /// `<results>` holding `result-error-code`, `result-error-message`,
    /// `result-jobid` and `result-status`.
    Async,
}

/// Reply of a synchronous ONTAP operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SingleResult {
    /// `passed` or `failed` as reported by the filer.
    pub status: String,
    /// ONTAP error number, 0 on success. [`ERRNO_UNKNOWN`][1] if the
    /// filer reported a failure without one.
    ///
    /// [1]: constant.ERRNO_UNKNOWN.html
    pub error_no: i64,
    /// Failure reason, empty on success.
    pub reason: String,
    /// Number of records, only present in some replies.
    pub num_records: Option<u64>,
}

impl SingleResult {
    pub fn passed(&self) -> bool {
        self.error_no == 0
    }
}

/// Reply of an asynchronous ONTAP operation, which queues a job on the
/// filer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AsyncResult {
    /// ONTAP error number, 0 on success.
    pub error_code: i64,
    /// Never empty when `error_code` is not 0.
    pub error_message: String,
    /// Identifier of the queued job.
    pub job_id: Option<u64>,
    /// Job status, e.g. `in_progress`, `succeeded` or `failed`.
    pub job_status: String,
}

impl AsyncResult {
    pub fn passed(&self) -> bool {
        self.error_code == 0
    }
}

/// Decoded reply, tagged by the [`ResultKind`][1] that was requested.
///
/// [1]: enum.ResultKind.html
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    Single(SingleResult),
    Async(AsyncResult),
}

impl OperationResult {
    pub fn passed(&self) -> bool {
        match *self {
            OperationResult::Single(ref r) => r.passed(),
            OperationResult::Async(ref r) => r.passed(),
        }
    }

    pub fn error_code(&self) -> i64 {
        match *self {
            OperationResult::Single(ref r) => r.error_no,
            OperationResult::Async(ref r) => r.error_code,
        }
    }

    /// Failure reason, empty string for passed operation.
    pub fn reason(&self) -> &str {
        match *self {
            OperationResult::Single(ref r) => &r.reason,
            OperationResult::Async(ref r) => &r.error_message,
        }
    }

    pub fn kind(&self) -> ResultKind {
        match *self {
            OperationResult::Single(_) => ResultKind::Single,
            OperationResult::Async(_) => ResultKind::Async,
        }
    }
}

#[derive(Deserialize, Debug)]
struct NetappReply {
    results: ResultsXml,
}

#[derive(Deserialize, Debug)]
struct ResultsXml {
    #[serde(rename = "@status", default)]
    status: String,
    #[serde(rename = "@errno", default)]
    errno: Option<i64>,
    #[serde(rename = "@reason", default)]
    reason: String,
    #[serde(rename = "num-records", default)]
    num_records: Option<u64>,
    #[serde(rename = "result-error-code", default)]
    result_error_code: Option<i64>,
    #[serde(rename = "result-error-message", default)]
    result_error_message: Option<String>,
    #[serde(rename = "result-jobid", default)]
    result_jobid: Option<u64>,
    #[serde(rename = "result-status", default)]
    result_status: Option<String>,
}

impl ResultsXml {
    /// `errno` attribute, or [`ERRNO_UNKNOWN`][1] when it is missing on a
    /// reply whose status is not `passed`.
    ///
    /// [1]: constant.ERRNO_UNKNOWN.html
    fn error_no(&self) -> i64 {
        match self.errno {
            Some(errno) => errno,
            None if self.status != STATUS_PASSED => ERRNO_UNKNOWN,
            None => 0,
        }
    }

    fn error_reason(&self) -> String {
        if self.error_no() != 0 && self.reason.is_empty() {
            format!(
                "Filer replied with status '{}' but no reason",
                self.status
            )
        } else {
            self.reason.clone()
        }
    }

    fn into_single(self) -> SingleResult {
        SingleResult {
            error_no: self.error_no(),
            reason: self.error_reason(),
            status: self.status,
            num_records: self.num_records,
        }
    }

    fn into_async(self) -> AsyncResult {
        // The API call itself may fail before any job is queued, in which
        // case only the `results` attributes are populated.
        let errno = self.error_no();
        let (error_code, error_message) = if errno != 0 {
            (errno, self.error_reason())
        } else {
            (
                self.result_error_code.unwrap_or(0),
                self.result_error_message.unwrap_or_default(),
            )
        };
        let error_message = if error_code != 0 && error_message.is_empty() {
            format!("Operation failed with error code {}", error_code)
        } else {
            error_message
        };
        AsyncResult {
            error_code,
            error_message,
            job_id: self.result_jobid,
            job_status: self.result_status.unwrap_or_default(),
        }
    }
}

fn verify_root_tag(body: &str) -> ::std::result::Result<(), DeError> {
    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event().map_err(DeError::InvalidXml)? {
            Event::Start(e) | Event::Empty(e) => {
                if e.local_name().as_ref() == NETAPP_ROOT_TAG {
                    return Ok(());
                }
                return Err(DeError::Custom(format!(
                    "Expecting root element 'netapp', got '{}'",
                    String::from_utf8_lossy(e.local_name().as_ref())
                )));
            }
            // Leave the empty document error to the deserializer.
            Event::Eof => return Ok(()),
            _ => continue,
        }
    }
}

pub(crate) fn decode(
    kind: ResultKind,
    body: &str,
) -> ::std::result::Result<OperationResult, DeError> {
    verify_root_tag(body)?;
    let reply: NetappReply = from_str(body)?;
    Ok(match kind {
        ResultKind::Single => {
            OperationResult::Single(reply.results.into_single())
        }
        ResultKind::Async => {
            OperationResult::Async(reply.results.into_async())
        }
    })
}

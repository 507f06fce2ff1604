/*
 * Copyright (C) 2017 Red Hat, Inc.
 * This library is free software; you can redistribute it and/or
 * modify it under the terms of the GNU Lesser General Public
 * License as published by the Free Software Foundation; either
 * version 2.1 of the License, or (at your option) any later version.
 *
 * This library is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * Lesser General Public License for more details.
 *
 * You should have received a copy of the GNU Lesser General Public
 * License along with this library; If not, see <http://www.gnu.org/licenses/>.
 *
 * Author: Gris Ge <fge@redhat.com>
 */

extern crate httpmock;
extern crate ontap;
extern crate rand;
extern crate serde_json;

use std::fs;
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use httpmock::prelude::*;
use httpmock::Mock;
use ontap::{Client, ClientOptions, LunCreateOptions, LunStateOp, OntapError,
            OperationRequest, ResultKind};
use rand::distributions::Alphanumeric;
use rand::Rng;

static SERVLET_PATH: &'static str =
    "/servlets/netapp.servlets.admin.XMLrequest_filer";
static SVM: &'static str = "svm1";
static LUN_PATH: &'static str = "/vol/vol1/lun1";
static PASSED_REPLY: &'static str = "<netapp version=\"1.10\" \
    xmlns=\"http://www.netapp.com/filer/admin\">\
    <results status=\"passed\"/></netapp>";

fn fixture(name: &str) -> String {
    let path =
        format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    match fs::read_to_string(&path) {
        Ok(s) => s.trim().to_string(),
        Err(e) => panic!("Failed to read fixture '{}': {}", path, e),
    }
}

/// Mock filer accepting only the `<name>_request.xml` body and replying
/// with `<name>_response.xml`.
fn mock_filer<'a>(server: &'a MockServer, name: &str) -> Mock<'a> {
    let req = fixture(&format!("{}_request.xml", name));
    let resp = fixture(&format!("{}_response.xml", name));
    server.mock(|when, then| {
        when.method(POST)
            .path(SERVLET_PATH)
            .header("content-type", "text/xml; charset=utf-8")
            .body(req);
        then.status(200)
            .header("content-type", "text/xml")
            .body(resp);
    })
}

fn make_connection(server: &MockServer) -> Client {
    Client::new(&server.base_url(), ontap::DEFAULT_API_VERSION, None)
        .unwrap()
}

fn random_string(prefix: &str) -> String {
    let rand_str: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(char::from)
        .collect();
    format!("{}{}", prefix, rand_str)
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[test]
fn lun_create() {
    let server = MockServer::start();
    let m = mock_filer(&server, "lun_create");
    let c = make_connection(&server);
    let opts = LunCreateOptions {
        size: 1024,
        ostype: "linux".to_string(),
        ..Default::default()
    };
    let reply = c.lun_create(SVM, &opts).unwrap();
    m.assert();
    assert!(reply.result.passed());
    assert_eq!(reply.result.error_no, 0);
    assert_eq!(reply.result.reason, "");
    assert_eq!(reply.response.status, 200);
    assert_eq!(reply.response.header("Content-Type"), Some("text/xml"));
}

#[test]
fn lun_create_failure() {
    let server = MockServer::start();
    let m = mock_filer(&server, "lun_create_failure");
    let c = make_connection(&server);
    let opts = LunCreateOptions {
        path: LUN_PATH.to_string(),
        ostype: "linux".to_string(),
        size: ontap::size_human_2_size_bytes("1GiB").unwrap(),
        space_reservation_enabled: true,
        ..Default::default()
    };
    let reply = c.lun_create(SVM, &opts).unwrap();
    m.assert();
    assert!(!reply.result.passed());
    assert_eq!(reply.result.status, "failed");
    assert_eq!(reply.result.error_no, 9999);
    assert_eq!(
        reply.result.reason,
        "Volume \"vol1\" does not have enough space for the LUN."
    );
}

#[test]
fn lun_map() {
    let server = MockServer::start();
    let m = mock_filer(&server, "lun_map");
    let c = make_connection(&server);
    let reply = c.lun_map(SVM, LUN_PATH, "igroup1", Some(0)).unwrap();
    m.assert();
    assert!(reply.result.passed());
}

#[test]
fn lun_map_without_lun_id() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST).path(SERVLET_PATH).body(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <netapp version=\"1.10\" \
             xmlns=\"http://www.netapp.com/filer/admin\" vfiler=\"svm1\">\
             <lun-map><path>/vol/vol1/lun1</path>\
             <initiator-group>igroup1</initiator-group></lun-map></netapp>",
        );
        then.status(200).body(PASSED_REPLY);
    });
    let c = make_connection(&server);
    assert!(c.lun_map(SVM, LUN_PATH, "igroup1", None)
        .unwrap()
        .result
        .passed());
    m.assert();
}

#[test]
fn lun_unmap() {
    let server = MockServer::start();
    let m = mock_filer(&server, "lun_unmap");
    let c = make_connection(&server);
    assert!(c.lun_unmap(SVM, LUN_PATH, "igroup1").unwrap().result.passed());
    m.assert();
}

#[test]
fn lun_state_change() {
    let server = MockServer::start();
    let c = make_connection(&server);

    let m_offline = mock_filer(&server, "lun_offline");
    let m_online = mock_filer(&server, "lun_online");
    let m_destroy = mock_filer(&server, "lun_destroy");

    assert!(c.lun_offline(SVM, LUN_PATH).unwrap().result.passed());
    assert!(c.lun_online(SVM, LUN_PATH).unwrap().result.passed());
    assert!(c.lun_operation(SVM, LUN_PATH, LunStateOp::Destroy)
        .unwrap()
        .result
        .passed());

    m_offline.assert();
    m_online.assert();
    m_destroy.assert();
}

#[test]
fn lun_random_path() {
    let server = MockServer::start();
    let path = format!("/vol/vol1/{}", random_string("lun_"));
    let m = server.mock(|when, then| {
        when.method(POST).path(SERVLET_PATH).body_contains(format!(
            "<lun-online><path>{}</path></lun-online>",
            path
        ));
        then.status(200).body(PASSED_REPLY);
    });
    let c = make_connection(&server);
    assert!(c.lun_online(SVM, &path).unwrap().result.passed());
    m.assert();
}

#[test]
fn volume_resize_async() {
    let server = MockServer::start();
    let m = mock_filer(&server, "volume_resize_async");
    let c = make_connection(&server);
    let reply = c.volume_resize_async(SVM, "vol1", "+10g").unwrap();
    m.assert();
    assert!(reply.result.passed());
    assert_eq!(reply.result.job_id, Some(2213));
    assert_eq!(reply.result.job_status, "in_progress");
}

#[test]
fn generic_invoke_without_vserver() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST).path(SERVLET_PATH).body(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <netapp version=\"1.21\" \
             xmlns=\"http://www.netapp.com/filer/admin\">\
             <system-get-version></system-get-version></netapp>",
        );
        then.status(200).body(
            "<netapp version=\"1.21\"><results status=\"passed\">\
             <build-timestamp>1585091021</build-timestamp>\
             <version>NetApp Release 9.7P2</version>\
             </results></netapp>",
        );
    });
    let c = Client::new(&server.base_url(), "1.21", None).unwrap();
    assert_eq!(c.version(), "1.21");
    let req = OperationRequest::new("system-get-version").unwrap();
    let reply = c.invoke(None, &req, ResultKind::Single).unwrap();
    m.assert();
    assert!(reply.result.passed());
    assert_eq!(reply.result.kind(), ResultKind::Single);
    assert!(reply.response.body.contains("9.7P2"));
}

#[test]
fn basic_auth() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST)
            .path(SERVLET_PATH)
            .header("authorization", "Basic YWRtaW46c2VjcmV0")
            .header("user-agent", "ontap-test");
        then.status(200).body(PASSED_REPLY);
    });
    let opts = ClientOptions {
        basic_auth_user: Some("admin".to_string()),
        basic_auth_password: Some("secret".to_string()),
        user_agent: "ontap-test".to_string(),
        ..Default::default()
    };
    let c = Client::new(&server.base_url(), "1.10", Some(opts)).unwrap();
    assert!(c.lun_offline(SVM, LUN_PATH).unwrap().result.passed());
    m.assert();
}

#[test]
fn permission_denied() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(SERVLET_PATH);
        then.status(401).body("Authorization required");
    });
    let c = make_connection(&server);
    match c.lun_online(SVM, LUN_PATH) {
        Err(OntapError::PermissionDenied { response, .. }) => {
            assert_eq!(response.status, 401);
            assert_eq!(response.body, "Authorization required");
        }
        r => panic!("Expecting PermissionDenied, got {:?}", r),
    }
}

#[test]
fn http_error_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(SERVLET_PATH);
        then.status(503).body("Service Unavailable");
    });
    let c = make_connection(&server);
    let e = c.lun_online(SVM, LUN_PATH).unwrap_err();
    match e {
        OntapError::HttpStatus { ref response, .. } => {
            assert_eq!(response.status, 503);
            assert_eq!(response.body, "Service Unavailable");
        }
        ref e => panic!("Expecting HttpStatus, got {:?}", e),
    }
    assert_eq!(e.response().map(|r| r.status), Some(503));
    assert_eq!(e.kind_str(), "Unexpected HTTP status");
}

#[test]
fn request_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(SERVLET_PATH);
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(PASSED_REPLY);
    });
    let opts = ClientOptions {
        timeout_ms: 200,
        ..Default::default()
    };
    let c = Client::new(&server.base_url(), "1.10", Some(opts)).unwrap();
    match c.lun_online(SVM, LUN_PATH) {
        Err(OntapError::TimeOut(_)) => (),
        r => panic!("Expecting TimeOut, got {:?}", r),
    }
}

#[test]
fn malformed_reply() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(SERVLET_PATH);
        then.status(200).body("<netapp><results status=\"passed\"");
    });
    let c = make_connection(&server);
    match c.lun_online(SVM, LUN_PATH) {
        Err(OntapError::TransportSerialization { response, .. }) => {
            assert_eq!(response.status, 200);
            assert_eq!(response.body, "<netapp><results status=\"passed\"");
        }
        r => panic!("Expecting TransportSerialization, got {:?}", r),
    }
}

#[test]
fn connection_refused() {
    let c = Client::new(&closed_port_url(), "1.10", None).unwrap();
    match c.lun_online(SVM, LUN_PATH) {
        Err(OntapError::NetworkConRefused(_)) => (),
        r => panic!("Expecting NetworkConRefused, got {:?}", r),
    }
}

#[test]
fn invalid_arguments_send_nothing() {
    let c = Client::new(&closed_port_url(), "1.10", None).unwrap();
    let is_invalid = |r: ontap::Result<_>| match r {
        Err(OntapError::InvalidArgument(_)) => true,
        _ => false,
    };
    let bad_create = LunCreateOptions {
        path: "lun1".to_string(),
        size: 1024,
        ..Default::default()
    };
    assert!(is_invalid(c.lun_create(SVM, &bad_create).map(|_| ())));
    assert!(is_invalid(c.lun_online(SVM, "lun1").map(|_| ())));
    assert!(is_invalid(c.lun_map(SVM, LUN_PATH, "", None).map(|_| ())));
    assert!(is_invalid(c.lun_unmap(SVM, "/vol/vol1", "ig").map(|_| ())));
    assert!(is_invalid(c.volume_resize_async(SVM, "", "10g").map(|_| ())));
    assert!(is_invalid(
        c.volume_resize_async(SVM, "vol1", "ten gigs").map(|_| ())
    ));
}

#[test]
fn invalid_base_url() {
    for url in &["", "filer.example.com", "ftp://filer.example.com"] {
        match Client::new(url, "1.10", None) {
            Err(OntapError::InvalidArgument(_)) => (),
            Err(e) => {
                panic!("Expecting InvalidArgument for {}, got {}", url, e)
            }
            Ok(_) => panic!("Expecting InvalidArgument for {}", url),
        }
    }
}

#[test]
fn shared_between_threads() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST).path(SERVLET_PATH);
        then.status(200).body(PASSED_REPLY);
    });
    let c = Arc::new(make_connection(&server));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let c = Arc::clone(&c);
            thread::spawn(move || c.lun_offline(SVM, LUN_PATH).unwrap())
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap().result.passed());
    }
    m.assert_hits(4);
}

#[test]
fn client_options_from_config() {
    let opts: ClientOptions = serde_json::from_str(
        r#"{"basic_auth_user": "admin", "ssl_verify": false}"#,
    ).unwrap();
    assert_eq!(opts.basic_auth_user, Some("admin".to_string()));
    assert_eq!(opts.basic_auth_password, None);
    assert!(!opts.ssl_verify);
    assert_eq!(opts.timeout_ms, ClientOptions::default().timeout_ms);
    assert_eq!(opts.user_agent, ClientOptions::default().user_agent);
}

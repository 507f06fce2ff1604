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

use super::error::*;
use super::request::OperationRequest;

/// Operation name of LUN creation.
pub const LUN_CREATE_OPERATION: &str = "lun-create-by-size";
/// Operation name of LUN mapping.
pub const LUN_MAP_OPERATION: &str = "lun-map";
/// Operation name of LUN unmapping.
pub const LUN_UNMAP_OPERATION: &str = "lun-unmap";
/// Operation name of bringing LUN online.
pub const LUN_ONLINE_OPERATION: &str = "lun-online";
/// Operation name of taking LUN offline.
pub const LUN_OFFLINE_OPERATION: &str = "lun-offline";
/// Operation name of LUN deletion.
pub const LUN_DESTROY_OPERATION: &str = "lun-destroy";
/// Operation name of asynchronous volume resize.
pub const VOLUME_SIZE_ASYNC_OPERATION: &str = "volume-size-async";

/// Arguments of [`Client::lun_create()`][1].
///
/// Empty strings, zero numbers and `false` booleans are not sent, leaving
/// the filer to apply its defaults.
///
/// ```rust
/// use ontap::LunCreateOptions;
///
/// let opts = LunCreateOptions {
///     path: "/vol/vol1/lun1".to_string(),
///     ostype: "linux".to_string(),
///     size: 1 << 30,
///     space_reservation_enabled: true,
///     ..Default::default()
/// };
/// assert!(opts.request().is_ok());
/// ```
///
/// [1]: struct.Client.html#method.lun_create
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LunCreateOptions {
    /// `regular`, `protocol_endpoint` or `vvol`.
    pub class: String,
    pub comment: String,
    /// Serial number of the foreign disk to import.
    pub foreign_disk: String,
    pub initiator_group: String,
    /// Host OS type, e.g. `linux`, `windows_2008` or `vmware`.
    pub ostype: String,
    /// LUN path, `/vol/<volume>/<lun>`.
    pub path: String,
    pub prefix_size: u64,
    pub qos_adaptive_policy_group: String,
    pub qos_policy_group: String,
    /// Size in bytes.
    pub size: u64,
    pub space_allocation_enabled: bool,
    pub space_reservation_enabled: bool,
    /// Create the LUN with exactly `size` bytes instead of rounding up to
    /// the filer geometry.
    pub use_exact_size: bool,
}

impl LunCreateOptions {
    /// Build the `lun-create-by-size` request.
    pub fn request(&self) -> Result<OperationRequest> {
        Ok(OperationRequest::new(LUN_CREATE_OPERATION)?
            .optional("class", &self.class)
            .optional("comment", &self.comment)
            .optional("foreign-disk", &self.foreign_disk)
            .optional("initiator-group", &self.initiator_group)
            .optional("ostype", &self.ostype)
            .optional("path", &self.path)
            .optional("prefix-size", self.prefix_size)
            .optional(
                "qos-adaptive-policy-group",
                &self.qos_adaptive_policy_group,
            )
            .optional("qos-policy-group", &self.qos_policy_group)
            .optional("size", self.size)
            .optional("space-allocation-enabled", self.space_allocation_enabled)
            .optional(
                "space-reservation-enabled",
                self.space_reservation_enabled,
            )
            .optional("use-exact-size", self.use_exact_size))
    }
}

/// LUN state change which takes only the LUN path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LunStateOp {
    /// Allow I/O to the LUN.
    Online,
    /// Block I/O to the LUN.
    Offline,
    /// Delete the LUN.
    Destroy,
}

impl LunStateOp {
    /// Operation name sent to the filer.
    pub fn as_str(self) -> &'static str {
        match self {
            LunStateOp::Online => LUN_ONLINE_OPERATION,
            LunStateOp::Offline => LUN_OFFLINE_OPERATION,
            LunStateOp::Destroy => LUN_DESTROY_OPERATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_sends_only_set_fields() {
        let opts = LunCreateOptions {
            size: 1024,
            ostype: "linux".to_string(),
            ..Default::default()
        };
        assert_eq!(
            opts.request().unwrap().to_xml().unwrap(),
            "<lun-create-by-size><ostype>linux</ostype><size>1024</size>\
             </lun-create-by-size>"
        );
    }

    #[test]
    fn create_request_wire_order() {
        let opts = LunCreateOptions {
            class: "regular".to_string(),
            comment: "db".to_string(),
            foreign_disk: "disk-sn".to_string(),
            initiator_group: "ig1".to_string(),
            ostype: "linux".to_string(),
            path: "/vol/v1/lun1".to_string(),
            prefix_size: 512,
            qos_adaptive_policy_group: "aqos".to_string(),
            qos_policy_group: "qos".to_string(),
            size: 2048,
            space_allocation_enabled: true,
            space_reservation_enabled: true,
            use_exact_size: true,
        };
        let tags: Vec<String> = opts
            .request()
            .unwrap()
            .params()
            .iter()
            .map(|p| p.tag().to_string())
            .collect();
        assert_eq!(
            tags,
            vec![
                "class",
                "comment",
                "foreign-disk",
                "initiator-group",
                "ostype",
                "path",
                "prefix-size",
                "qos-adaptive-policy-group",
                "qos-policy-group",
                "size",
                "space-allocation-enabled",
                "space-reservation-enabled",
                "use-exact-size",
            ]
        );
    }

    #[test]
    fn state_op_names() {
        assert_eq!(LunStateOp::Online.as_str(), "lun-online");
        assert_eq!(LunStateOp::Offline.as_str(), "lun-offline");
        assert_eq!(LunStateOp::Destroy.as_str(), "lun-destroy");
    }
}

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

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::error::*;
use super::misc::{verify_xml_name, verify_xml_text};

const NETAPP_ROOT_TAG: &str = "netapp";
const NETAPP_XMLNS: &str = "http://www.netapp.com/filer/admin";

/// Value carried by a request parameter.
///
/// Implemented for strings, booleans, integers and `Option` of those.
pub trait ParamValue {
    /// Whether the value is considered empty. Optional parameters holding
    /// an empty value are left out of the request:
    ///
    ///  * `""` for strings.
    ///  * `false` for booleans.
    ///  * `0` for integers.
    ///  * `None` for `Option`. `Some(0)` is *not* empty.
    fn is_zero(&self) -> bool;

    /// Text placed inside the XML element.
    fn to_text(&self) -> String;
}

impl ParamValue for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_text(&self) -> String {
        self.clone()
    }
}

impl ParamValue for bool {
    fn is_zero(&self) -> bool {
        !*self
    }

    fn to_text(&self) -> String {
        if *self {
            "true".to_string()
        } else {
            "false".to_string()
        }
    }
}

macro_rules! impl_param_value_int {
    ($($t:ty),*) => {
        $(
            impl ParamValue for $t {
                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn to_text(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_param_value_int!(i32, i64, u32, u64);

impl<T: ParamValue> ParamValue for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn to_text(&self) -> String {
        match *self {
            Some(ref v) => v.to_text(),
            None => String::new(),
        }
    }
}

impl<'a, T: ParamValue + ?Sized> ParamValue for &'a T {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn to_text(&self) -> String {
        (**self).to_text()
    }
}

/// A named XML leaf: `<tag>text</tag>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    tag: String,
    text: String,
}

impl Param {
    pub fn new(tag: &str, text: &str) -> Param {
        Param {
            tag: tag.to_string(),
            text: text.to_string(),
        }
    }

    /// Element name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Inner text, unescaped.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One ONTAP API call: the operation name plus its parameters in wire
/// order.
///
/// ```rust
/// use ontap::OperationRequest;
///
/// let req = OperationRequest::new("lun-online")
///     .unwrap()
///     .required("path", "/vol/vol1/lun1")
///     .optional("force", false);
/// assert_eq!(
///     req.to_xml().unwrap(),
///     "<lun-online><path>/vol/vol1/lun1</path></lun-online>"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    name: String,
    params: Vec<Param>,
}

impl OperationRequest {
    /// Start a request for operation `name`, which becomes the root tag.
    ///
    /// # Errors
    ///
    ///  * [`OntapError::InvalidArgument`][1]: `name` is empty or not a
    ///    valid XML element name.
    ///
    /// [1]: enum.OntapError.html#variant.InvalidArgument
    pub fn new(name: &str) -> Result<OperationRequest> {
        verify_xml_name(name)?;
        Ok(OperationRequest {
            name: name.to_string(),
            params: Vec::new(),
        })
    }

    /// Append a parameter which is always sent, even when empty.
    pub fn required<V: ParamValue>(mut self, name: &str, value: V) -> Self {
        self.params.push(Param::new(name, &value.to_text()));
        self
    }

    /// Append a parameter which is dropped when
    /// [`ParamValue::is_zero()`][1] holds.
    ///
    /// [1]: trait.ParamValue.html#tymethod.is_zero
    pub fn optional<V: ParamValue>(self, name: &str, value: V) -> Self {
        if value.is_zero() {
            self
        } else {
            self.required(name, value)
        }
    }

    /// Operation name, also the root tag of [`to_xml()`][1].
    ///
    /// [1]: #method.to_xml
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters that will be serialized, in order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Serialize into a standalone XML document rooted at the operation
    /// name.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    pub(crate) fn write_to<W: Write>(
        &self,
        writer: &mut Writer<W>,
    ) -> Result<()> {
        for p in &self.params {
            verify_xml_name(&p.tag)?;
            verify_xml_text(&p.text)?;
        }
        writer.write_event(Event::Start(BytesStart::new(self.name.as_str())))?;
        for p in &self.params {
            writer.write_event(Event::Start(BytesStart::new(p.tag.as_str())))?;
            writer.write_event(Event::Text(BytesText::new(&p.text)))?;
            writer.write_event(Event::End(BytesEnd::new(p.tag.as_str())))?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

/// Wrap `req` into the `<netapp>` envelope the filer servlet expects.
/// An empty `vserver` is treated as no vserver tunneling.
pub(crate) fn envelope(
    req: &OperationRequest,
    version: &str,
    vserver: Option<&str>,
) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new(
        "1.0",
        Some("UTF-8"),
        None,
    )))?;
    let mut root = BytesStart::new(NETAPP_ROOT_TAG);
    root.push_attribute(("version", version));
    root.push_attribute(("xmlns", NETAPP_XMLNS));
    if let Some(v) = vserver.filter(|v| !v.is_empty()) {
        root.push_attribute(("vfiler", v));
    }
    writer.write_event(Event::Start(root))?;
    req.write_to(&mut writer)?;
    writer.write_event(Event::End(BytesEnd::new(NETAPP_ROOT_TAG)))?;
    Ok(writer.into_inner())
}

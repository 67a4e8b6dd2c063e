use super::{
    entry::{Entries, OperationEntry},
    MapSource,
};
use crate::{Error, MappingTable, Result, Translation};

use roxmltree::{Document, Node};
use std::path::Path;

/// Mapping table described by an XML document.
///
/// ```xml
/// <operations>
///   <operation name="GetUser">
///     <spName>usp_GetUser</spName>
///     <returnDataType>SingleRow</returnDataType>
///     <parameters>
///       <parameter>
///         <parameterName>Id</parameterName>
///         <spParameterName>UserId</spParameterName>
///       </parameter>
///     </parameters>
///   </operation>
/// </operations>
/// ```
///
/// An operation without a `<parameters>` element takes no parameters.
#[derive(Debug)]
pub struct XmlMap {
    entries: Entries,
}

impl XmlMap {
    /// Parses an XML mapping description.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)
            .map_err(|err| Error::invalid_mapping(format!("malformed XML mapping; {err}")))?;

        let root = doc.root_element();
        if !root.has_tag_name("operations") {
            return Err(Error::invalid_mapping(format!(
                "expected an `operations` root element, found `{}`",
                root.tag_name().name()
            )));
        }

        let operations = elements(root, "operation")
            .map(operation)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries: Entries::new(operations),
        })
    }

    /// Reads and parses an XML mapping file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|err| {
            Error::from(err).context(format!("reading mapping file {}", path.display()))
        })?;

        Self::from_xml(&xml)
    }
}

impl MapSource for XmlMap {
    fn build(&mut self) -> Result<MappingTable> {
        self.entries.build()
    }
}

fn operation(node: Node<'_, '_>) -> Result<OperationEntry> {
    let name = node
        .attribute("name")
        .ok_or_else(|| Error::invalid_mapping("operation without a `name` attribute"))?
        .to_string();

    let procedure = required_text(node, "spName", &name)?;
    let shape = required_text(node, "returnDataType", &name)?;

    let parameters = match child(node, "parameters") {
        Some(parameters) => {
            let mut translation = Translation::new();

            for parameter in elements(parameters, "parameter") {
                let logical = required_text(parameter, "parameterName", &name)?;
                let wire = required_text(parameter, "spParameterName", &name)?;

                if translation.contains_key(&logical) {
                    return Err(Error::invalid_mapping(format!(
                        "operation `{name}` maps parameter `{logical}` twice"
                    )));
                }

                translation.insert(logical, wire);
            }

            Some(translation)
        }
        None => None,
    };

    Ok(OperationEntry {
        name,
        procedure,
        shape,
        parameters,
    })
}

fn elements<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(name))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    elements(node, name).next()
}

fn required_text(node: Node<'_, '_>, name: &'static str, operation: &str) -> Result<String> {
    let element = child(node, name).ok_or_else(|| {
        Error::invalid_mapping(format!("operation `{operation}` has no `{name}` element"))
    })?;

    Ok(element.text().unwrap_or_default().trim().to_string())
}

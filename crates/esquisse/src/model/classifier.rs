//! Classifiers and their members
//!
//! A classifier is a named structural unit: a class, interface, or
//! enumeration, with ordered fields and operations, canvas placement, and
//! display style.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visibility modifier for classifiers and members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    PackageDefault,
}

impl Visibility {
    /// Map a Java visibility keyword to its variant
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "protected" => Some(Visibility::Protected),
            _ => None,
        }
    }

    /// The Java keyword, empty for package-default visibility
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::PackageDefault => "",
        }
    }
}

/// Kind of classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClassifierKind {
    #[default]
    Class,
    Interface,
    Enumeration,
}

impl ClassifierKind {
    /// Map a declaration keyword (`class`, `interface`, `enum`) to its kind
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(ClassifierKind::Class),
            "interface" => Some(ClassifierKind::Interface),
            "enum" => Some(ClassifierKind::Enumeration),
            _ => None,
        }
    }

    /// The declaration keyword for this kind
    pub fn keyword(self) -> &'static str {
        match self {
            ClassifierKind::Class => "class",
            ClassifierKind::Interface => "interface",
            ClassifierKind::Enumeration => "enum",
        }
    }
}

impl fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A field owned by a classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// Opaque type name: primitive, generic instantiation, array, or a
    /// reference to another classifier's simple name
    pub type_name: String,
    /// Opaque initializer expression, absent when none was declared
    pub default_value: Option<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            default_value: None,
            visibility: Visibility::Private,
            is_static: false,
            is_final: false,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn statik(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn finalized(mut self) -> Self {
        self.is_final = true;
        self
    }
}

/// A parameter of an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    /// Documentation-only default value expression
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            default_value: None,
        }
    }
}

/// An operation owned by a classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    /// Return type name; `None` means void
    pub return_type: Option<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub parameters: Vec<Parameter>,
}

impl Operation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_final: false,
            parameters: Vec::new(),
        }
    }

    pub fn returning(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn statik(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn abstracted(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn finalized(mut self) -> Self {
        self.is_final = true;
        self
    }
}

/// Canvas placement of a classifier node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 150.0,
        }
    }
}

/// Display style of a classifier node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub fill_color: String,
    pub border_color: String,
    pub border_width: f64,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            fill_color: "#FFFFFF".to_string(),
            border_color: "#000000".to_string(),
            border_width: 1.0,
        }
    }
}

/// A classifier in the diagram
///
/// Name uniqueness within a namespace is not enforced here; the validator
/// reports duplicate `(namespace, name)` pairs as a diagram defect. Graph
/// algorithms identify classifiers by [`super::ClassifierId`], never by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classifier {
    pub name: String,
    /// Dot-separated namespace path, empty for the default namespace
    pub namespace: String,
    pub kind: ClassifierKind,
    pub is_abstract: bool,
    pub fields: Vec<Field>,
    pub operations: Vec<Operation>,
    pub bounds: Bounds,
    pub style: NodeStyle,
}

impl Classifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: String::new(),
            kind: ClassifierKind::Class,
            is_abstract: false,
            fields: Vec::new(),
            operations: Vec::new(),
            bounds: Bounds::default(),
            style: NodeStyle::default(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_kind(mut self, kind: ClassifierKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn abstracted(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn add_operation(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Namespace-qualified name, or the simple name when the namespace is
    /// empty
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

//! Auxiliary resources and their external class references.
//!
//! Non-bytecode files shipped with a program (service descriptors, reflection
//! and Kotlin metadata) refer to classes by external, dot-separated name. When
//! auxiliary metadata is retained, reference fixup rewrites these names to the
//! renamed classes. References that never resolved to a program class belong to
//! libraries outside the program and are deliberately left alone.

use crate::model::pool::ClassId;

/// An external pointer to a class inside a non-bytecode resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaReference {
    /// The externally-formatted class name as it appears in the resource
    /// (`com.example.Outer$Inner`)
    pub external_name: String,
    /// The referenced program class, if resolution succeeded
    pub target: Option<ClassId>,
}

impl JavaReference {
    /// Creates an unresolved reference.
    #[must_use]
    pub fn new(external_name: &str) -> Self {
        JavaReference {
            external_name: external_name.to_string(),
            target: None,
        }
    }

    /// Creates a reference resolved to a program class.
    #[must_use]
    pub fn resolved(external_name: &str, target: ClassId) -> Self {
        JavaReference {
            external_name: external_name.to_string(),
            target: Some(target),
        }
    }
}

/// One auxiliary resource file and the class references found in it.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    /// Resource path within the program archive
    pub name: String,
    /// Class references to fix up after renaming
    pub references: Vec<JavaReference>,
}

impl Resource {
    /// Creates an empty resource with the given path.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Resource {
            name: name.to_string(),
            references: Vec::new(),
        }
    }
}

/// All auxiliary resources of the processed program.
#[derive(Debug, Clone, Default)]
pub struct ResourcePool {
    /// The resources, in archive order
    pub resources: Vec<Resource>,
}

impl ResourcePool {
    /// Creates an empty resource pool.
    #[must_use]
    pub fn new() -> Self {
        ResourcePool::default()
    }

    /// Adds a resource to the pool.
    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Whether the pool holds no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

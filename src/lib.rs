// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # shroud
//!
//! A renaming and reference-fixup engine for obfuscating JVM class files.
//!
//! `shroud` implements the obfuscation stage of a bytecode-processing
//! pipeline: it assigns short, collision-free names to the classes, fields,
//! and methods of a program, compacts per-entity attribute metadata down to
//! what a reachability analysis marked as used, and then rewrites every
//! symbolic reference — in the class files and in auxiliary resources — to
//! the new names. The rewritten program still links, still dispatches
//! overridden methods correctly, and still resolves external references to
//! renamed classes.
//!
//! ## Features
//!
//! - **Pluggable name generation** - Alphabetic, numeric, and dictionary-backed
//!   candidate factories with deterministic restart
//! - **Hierarchy-aware member renaming** - Override groups across the class
//!   hierarchy always share one name, preserving polymorphic dispatch
//! - **Inner-class consistency** - Anonymous and local classes follow their
//!   enclosing class's new name
//! - **Attribute shrinking** - Mark-and-compact removal of unused metadata
//! - **Reference fixup** - Constant-pool and auxiliary-resource rewriting
//! - **Mapping I/O** - Print, fan out, and re-apply old-to-new name tables
//!
//! ## Quick Start
//!
//! ```rust
//! use shroud::model::{Class, ClassPool, Member};
//! use shroud::obfuscate::{ObfuscationConfig, Obfuscator, RunOptions};
//! use shroud::mapping::MappingPrinter;
//!
//! // Build (or load) the program model.
//! let mut pool = ClassPool::new();
//! let mut class = Class::new("com/example/Main");
//! class.add_member(Member::method("greet", "()V"));
//! pool.add_class(class);
//!
//! // Rename everything, recording the mapping.
//! let obfuscator = Obfuscator::new(ObfuscationConfig::new())?;
//! let mut printer = MappingPrinter::new(Vec::new());
//! obfuscator.run(
//!     &mut pool,
//!     RunOptions {
//!         mapping_sink: Some(&mut printer),
//!         ..RunOptions::default()
//!     },
//! )?;
//! let mapping = String::from_utf8(printer.finish()?).unwrap();
//! assert!(mapping.contains("com.example.Main -> "));
//! # Ok::<(), shroud::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `shroud` is organized into four modules:
//!
//! - [`model`] - The mutable program graph: class pool, members, attributes,
//!   symbolic references, auxiliary resources
//! - [`naming`] - Candidate name factories
//! - [`obfuscate`] - The pass pipeline: usage marking, compaction, pinning,
//!   class and member renaming, reference fixup
//! - [`mapping`] - Mapping event emission, printing, and re-application
//!
//! Passes run strictly one after another over an exclusively owned pool.
//! Attribute compaction and reference fixup parallelize across independent
//! owners; the renamers are deliberately sequential, because every allocation
//! writes into a shared namespace that the next decision must observe.

#[macro_use]
pub(crate) mod error;

pub mod mapping;
pub mod model;
pub mod naming;
pub mod obfuscate;
pub mod prelude;

pub use error::{Error, Result};

//! Compilation session.
//!
//! A session owns everything that outlives a single parser: the arena
//! context, the table of declared type names, the semantic types of the
//! classes registered so far and the cache of imported translation units.

use std::{
    collections::{HashMap, HashSet},
    fs, io,
    path::{Component, Path, PathBuf},
    rc::Rc,
};

use tracing::debug;

use crate::{
    arena::{context::Context, strings::Name},
    ast::{
        eval::eval_const_expr,
        node::{DeclRef, ExprRef, NodeRef, TreeError, TypeExprRef},
        types::TypeExpr,
    },
    errors::errors::{Error, ErrorImpl},
    parser::{
        lookups::PRIMITIVE_LOOKUP,
        parser::{parse_line, parse_program, Parser},
    },
    types::types::{Type, TypeRef},
    Position,
};

/// Where imported sources come from.
pub trait SourceLoader {
    /// Turns the text of an `import` into the path used as the cache key.
    ///
    /// Relative paths are taken from the importing file's directory, or from
    /// the working directory when the importer is not a file.
    fn resolve(&self, importer: Option<&Path>, path: &str) -> PathBuf {
        let base = importer
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default();

        normalize(&base.join(path))
    }

    fn load(&self, path: &Path) -> io::Result<String>;
}

/// Drops `.` components and folds `..` into the preceding name.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let ends_in_name = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if ends_in_name {
                    normalized.pop();
                } else {
                    normalized.push(component);
                }
            }
            _ => normalized.push(component),
        }
    }

    normalized
}

/// Reads sources from disk, keyed by canonical path.
#[derive(Debug, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn resolve(&self, importer: Option<&Path>, path: &str) -> PathBuf {
        let base = importer
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let joined = base.join(path);

        fs::canonicalize(&joined).unwrap_or_else(|_| normalize(&joined))
    }

    fn load(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Serves sources from memory.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        MemoryLoader::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        self.files.insert(path.into(), source.into());
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such source: {}", path.display()),
            )
        })
    }
}

pub struct Session {
    context: Context,
    /// Names accepted as the base of a type. Never shrinks.
    type_names: HashSet<Name>,
    class_types: HashMap<Name, TypeRef>,
    /// Root block of every unit parsed from a path, by resolved path
    imports: HashMap<PathBuf, NodeRef>,
    /// Units currently being parsed, innermost last
    loading: Vec<PathBuf>,
    /// Source text of every loaded unit, by the file name used in positions
    sources: HashMap<String, Rc<str>>,
    loader: Box<dyn SourceLoader>,
}

impl Session {
    pub fn new() -> Self {
        Session::with_loader(FsLoader)
    }

    pub fn with_loader(loader: impl SourceLoader + 'static) -> Self {
        let context = Context::new();
        let type_names = PRIMITIVE_LOOKUP
            .keys()
            .map(|name| context.intern(name))
            .collect();

        Session {
            context,
            type_names,
            class_types: HashMap::new(),
            imports: HashMap::new(),
            loading: vec![],
            sources: HashMap::new(),
            loader: Box::new(loader),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn is_type_name(&self, name: &str) -> bool {
        self.type_names.contains(name)
    }

    /// Adds a name to the type-name table, returns false if it was already there.
    pub fn declare_type_name(&mut self, name: Name) -> bool {
        self.type_names.insert(name)
    }

    /// The semantic type of a registered class.
    pub fn class_type(&self, name: &str) -> Option<TypeRef> {
        self.class_types.get(name).cloned()
    }

    /// Makes a parsed class usable as a type name and builds its semantic type.
    pub fn register_class(&mut self, class: &DeclRef) -> Result<TypeRef, ErrorImpl> {
        let decl = class.get();
        let class_decl = decl
            .as_class()
            .ok_or(ErrorImpl::MalformedTree(TreeError::NotAClass))?;
        let name = class_decl.name.clone();

        if self.is_type_name(&name) {
            return Err(ErrorImpl::ClassAlreadyDefined {
                name: name.to_string(),
            });
        }

        let mut members = vec![];
        for member in &class_decl.members {
            if let Some(var) = member.get().as_var() {
                members.push(self.resolve_type(&var.ty)?);
            }
        }

        debug!(class = %name, members = members.len(), "registered class");

        let ty = self.context.alloc_type(Type::Class {
            name: name.clone(),
            members,
        });
        self.declare_type_name(name.clone());
        self.class_types.insert(name, ty.clone());

        Ok(ty)
    }

    /// Lowers type syntax to a semantic type.
    ///
    /// Array sizes must fold to a non-negative integer constant. An unsized
    /// array gets length 0.
    pub fn resolve_type(&self, ty: &TypeExprRef) -> Result<TypeRef, ErrorImpl> {
        match &*ty.get() {
            TypeExpr::Primitive(primitive) => Ok(primitive.clone()),
            TypeExpr::Pointer(pointee) => {
                let pointee = self.resolve_type(pointee)?;
                Ok(self.context.pointer_to(pointee))
            }
            TypeExpr::Array { element, size } => {
                let element = self.resolve_type(element)?;
                let length = match size {
                    None => 0,
                    Some(size) => eval_const_expr(size)
                        .and_then(|length| u32::try_from(length).ok())
                        .ok_or(ErrorImpl::NonConstantArraySize)?,
                };

                Ok(self.context.alloc_type(Type::Array { element, length }))
            }
            TypeExpr::Class(name) => self
                .class_type(name)
                .ok_or_else(|| ErrorImpl::TypeUndefined {
                    name: name.to_string(),
                }),
        }
    }

    /// Parses `source` as a whole program.
    ///
    /// # Arguments
    ///
    /// * `source` - Program text
    /// * `file` - Name used in error positions, "shell" when absent
    pub fn parse_string(&mut self, source: &str, file: Option<String>) -> Result<NodeRef, Error> {
        debug!(file = ?file, len = source.len(), "parsing program");

        if let Some(file) = &file {
            self.sources.insert(file.clone(), Rc::from(source));
        }

        let mut parser = Parser::new(source, file, None, self)?;
        parse_program(&mut parser)
    }

    /// Parses exactly one expression.
    pub fn parse_line_expr(&mut self, source: &str) -> Result<ExprRef, Error> {
        debug!(len = source.len(), "parsing expression");

        let mut parser = Parser::new(source, None, None, self)?;
        parse_line(&mut parser)
    }

    /// Parses the program at `path`. A path parsed before returns the same root.
    pub fn parse_file(&mut self, path: &Path) -> Result<NodeRef, Error> {
        let resolved = self.loader.resolve(None, &path.to_string_lossy());
        let position = Position(0, Rc::new(path.display().to_string()));

        self.load_unit(resolved, position)
    }

    /// Parses an imported unit once per session.
    ///
    /// # Arguments
    ///
    /// * `importer` - Path of the unit containing the `import`, if any
    /// * `path` - The imported path as written
    /// * `position` - Where the `import` is, for errors
    pub fn import(
        &mut self,
        importer: Option<&Path>,
        path: &str,
        position: Position,
    ) -> Result<NodeRef, Error> {
        let resolved = self.loader.resolve(importer, path);
        self.load_unit(resolved, position)
    }

    fn load_unit(&mut self, path: PathBuf, position: Position) -> Result<NodeRef, Error> {
        if let Some(root) = self.imports.get(&path) {
            debug!(path = %path.display(), "import cache hit");
            return Ok(root.clone());
        }

        if self.loading.contains(&path) {
            return Err(Error::new(
                ErrorImpl::CircularImport {
                    path: path.display().to_string(),
                },
                position,
            ));
        }

        let source = self.loader.load(&path).map_err(|e| {
            Error::new(
                ErrorImpl::ImportFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                },
                position.clone(),
            )
        })?;

        let file = path.display().to_string();
        debug!(path = %file, "parsing unit");
        self.sources.insert(file.clone(), Rc::from(source.as_str()));

        self.loading.push(path.clone());
        let parsed = self.parse_unit(&source, file, path.clone());
        self.loading.pop();

        let root = parsed?;
        self.imports.insert(path, root.clone());
        Ok(root)
    }

    fn parse_unit(&mut self, source: &str, file: String, path: PathBuf) -> Result<NodeRef, Error> {
        let mut parser = Parser::new(source, Some(file), Some(path), self)?;
        parse_program(&mut parser)
    }

    /// Source text of a loaded unit, by the file name its positions carry.
    pub fn source_of(&self, file: &str) -> Option<Rc<str>> {
        self.sources.get(file).cloned()
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

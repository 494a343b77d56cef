//! Declaration and statement writers
//!
//! Writers hand out nested writers to body closures. Closures return
//! `Result<(), E>` so the caller's own error type flows straight through.

use crate::types::{SwiftParameter, SwiftType, SwiftVisibility};

const INDENT: &str = "    ";

/// Line-oriented text buffer with an indentation depth
#[derive(Debug, Default)]
struct IndentedWriter {
    output: String,
    depth: usize,
}

impl IndentedWriter {
    fn at_depth(depth: usize) -> Self {
        Self {
            output: String::new(),
            depth,
        }
    }

    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.output.push_str(INDENT);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Write `header {`, the pre-rendered body, and `}`; `header {}` when empty.
    fn block(&mut self, header: &str, body: &str) {
        if body.is_empty() {
            self.line(&format!("{} {{}}", header));
        } else {
            self.line(&format!("{} {{", header));
            self.output.push_str(body);
            self.line("}");
        }
    }

    fn statements(&mut self, header: &str, statements: &[String]) {
        let mut body = IndentedWriter::at_depth(self.depth + 1);
        for statement in statements {
            body.line(statement);
        }
        self.block(header, &body.output);
    }
}

/// Header of a class declaration
#[derive(Debug, Clone)]
pub struct SwiftClass {
    /// Class visibility
    pub visibility: SwiftVisibility,
    /// Declared `final`
    pub is_final: bool,
    /// Class name
    pub name: String,
    /// Superclass
    pub base: Option<SwiftType>,
    /// Protocol conformances, after the superclass
    pub conformances: Vec<SwiftType>,
}

/// Signature of a function declaration
#[derive(Debug, Clone)]
pub struct SwiftFunc {
    /// Function visibility
    pub visibility: SwiftVisibility,
    /// Declared `static`
    pub is_static: bool,
    /// Function name
    pub name: String,
    /// Parameters
    pub params: Vec<SwiftParameter>,
    /// Declared `throws`
    pub throws: bool,
    /// Return type; `None` for `Void`
    pub return_type: Option<SwiftType>,
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writer for a whole `.swift` file
#[derive(Debug, Default)]
pub struct SwiftSourceFileWriter {
    out: IndentedWriter,
    declarations: usize,
}

impl SwiftSourceFileWriter {
    /// Create an empty file writer
    pub fn new() -> Self {
        Self::default()
    }

    /// `// text`
    pub fn write_comment(&mut self, text: &str) {
        self.out.line(&format!("// {}", text));
    }

    /// `import module`
    pub fn write_import(&mut self, module: &str) {
        self.out.line(&format!("import {}", module));
    }

    fn begin_declaration(&mut self) {
        if !self.out.output.is_empty() {
            self.out.line("");
        }
        self.declarations += 1;
    }

    /// Write a class declaration
    pub fn write_class<E>(
        &mut self,
        class: &SwiftClass,
        body: impl FnOnce(&mut SwiftRecordBodyWriter) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut header = format!("{} ", class.visibility);
        if class.is_final {
            header.push_str("final ");
        }
        header.push_str("class ");
        header.push_str(&class.name);

        let inherited: Vec<SwiftType> = class
            .base
            .iter()
            .chain(class.conformances.iter())
            .cloned()
            .collect();
        if !inherited.is_empty() {
            header.push_str(": ");
            header.push_str(&join(&inherited));
        }

        self.write_record(&header, body)
    }

    /// Write an extension of an existing type
    pub fn write_extension<E>(
        &mut self,
        ty: &SwiftType,
        conformances: &[SwiftType],
        body: impl FnOnce(&mut SwiftRecordBodyWriter) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut header = format!("extension {}", ty);
        if !conformances.is_empty() {
            header.push_str(": ");
            header.push_str(&join(conformances));
        }
        self.write_record(&header, body)
    }

    fn write_record<E>(
        &mut self,
        header: &str,
        body: impl FnOnce(&mut SwiftRecordBodyWriter) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut record = SwiftRecordBodyWriter {
            out: IndentedWriter::at_depth(self.out.depth + 1),
            last_member: None,
        };
        body(&mut record)?;

        self.begin_declaration();
        self.out.block(header, &record.out.output);
        Ok(())
    }

    /// Number of top-level declarations written so far
    pub fn declaration_count(&self) -> usize {
        self.declarations
    }

    /// Finish and return the file contents
    pub fn into_string(self) -> String {
        self.out.output
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberShape {
    Line,
    Block,
}

/// Writer for the members of a class or extension
#[derive(Debug)]
pub struct SwiftRecordBodyWriter {
    out: IndentedWriter,
    last_member: Option<MemberShape>,
}

impl SwiftRecordBodyWriter {
    /// Single-line members cluster together; block members get a blank line around them.
    fn begin_member(&mut self, shape: MemberShape) {
        if let Some(last) = self.last_member {
            if last == MemberShape::Block || shape == MemberShape::Block {
                self.out.line("");
            }
        }
        self.last_member = Some(shape);
    }

    /// `public typealias Name = Target`
    pub fn write_type_alias(&mut self, visibility: SwiftVisibility, name: &str, target: &SwiftType) {
        self.begin_member(MemberShape::Line);
        self.out
            .line(&format!("{} typealias {} = {}", visibility, name, target));
    }

    /// `public static let name: Type = initializer`
    pub fn write_stored_property(
        &mut self,
        visibility: SwiftVisibility,
        is_static: bool,
        is_let: bool,
        name: &str,
        ty: Option<&SwiftType>,
        initializer: Option<&str>,
    ) {
        self.begin_member(MemberShape::Line);
        let mut text = format!("{} ", visibility);
        if is_static {
            text.push_str("static ");
        }
        text.push_str(if is_let { "let " } else { "var " });
        text.push_str(name);
        if let Some(ty) = ty {
            text.push_str(&format!(": {}", ty));
        }
        if let Some(initializer) = initializer {
            text.push_str(&format!(" = {}", initializer));
        }
        self.out.line(&text);
    }

    /// A read-only computed property, optionally with a throwing getter
    pub fn write_computed_property<E>(
        &mut self,
        visibility: SwiftVisibility,
        name: &str,
        ty: &SwiftType,
        throws: bool,
        body: impl FnOnce(&mut SwiftStatementWriter) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut statements = SwiftStatementWriter::default();
        body(&mut statements)?;

        self.begin_member(MemberShape::Block);
        let header = format!("{} var {}: {}", visibility, name, ty);
        if throws {
            let mut getter = IndentedWriter::at_depth(self.out.depth + 1);
            getter.statements("get throws", &statements.statements);
            self.out.block(&header, &getter.output);
        } else {
            self.out.statements(&header, &statements.statements);
        }
        Ok(())
    }

    /// A function declaration with a body
    pub fn write_func<E>(
        &mut self,
        func: &SwiftFunc,
        body: impl FnOnce(&mut SwiftStatementWriter) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut statements = SwiftStatementWriter::default();
        body(&mut statements)?;

        self.begin_member(MemberShape::Block);
        let mut header = format!("{} ", func.visibility);
        if func.is_static {
            header.push_str("static ");
        }
        header.push_str(&format!("func {}({})", func.name, join(&func.params)));
        if func.throws {
            header.push_str(" throws");
        }
        if let Some(return_type) = &func.return_type {
            header.push_str(&format!(" -> {}", return_type));
        }
        self.out.statements(&header, &statements.statements);
        Ok(())
    }

    /// An initializer
    pub fn write_init<E>(
        &mut self,
        visibility: SwiftVisibility,
        params: &[SwiftParameter],
        body: impl FnOnce(&mut SwiftStatementWriter) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut statements = SwiftStatementWriter::default();
        body(&mut statements)?;

        self.begin_member(MemberShape::Block);
        let header = format!("{} init({})", visibility, join(params));
        self.out.statements(&header, &statements.statements);
        Ok(())
    }
}

/// Collects the statements of a function or accessor body
#[derive(Debug, Default)]
pub struct SwiftStatementWriter {
    statements: Vec<String>,
}

impl SwiftStatementWriter {
    /// Append one statement
    pub fn write_statement(&mut self, statement: impl Into<String>) {
        self.statements.push(statement.into());
    }

    /// A body that traps at run time; marks a binding the generator cannot produce yet
    pub fn write_not_implemented(&mut self, what: &str) {
        self.write_statement(format!("fatalError(\"Not implemented: {}\")", what));
    }
}

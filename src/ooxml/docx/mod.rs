/// Word (.docx) document support.
///
/// Reading is limited to what table replacement needs: the body-level
/// tables of the main document part, their byte spans and their cell text,
/// plus the style ids the document defines. Writing renders new tables as
/// WordprocessingML fragments.
///
/// # Example
///
/// ```rust,no_run
/// use edital::ooxml::docx::Package;
///
/// let data = std::fs::read("termo.docx")?;
/// let package = Package::from_bytes(&data)?;
///
/// for table in package.document()?.tables()? {
///     for row in table.cell_texts()? {
///         println!("{}", row.join(" | "));
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod package;
pub mod parts;
pub mod styles;
pub mod table;
pub mod writer;

pub use package::Package;
pub use parts::DocumentPart;
pub use styles::{Style, StyleType, Styles};
pub use table::{Cell, Row, Table, VMergeState};

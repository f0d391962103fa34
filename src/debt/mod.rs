/*!
 * Debt editing helpers: the compound-interest projection and an editor that
 * loads, edits and writes back one debt record.
 */

pub use self::editor::DebtEditor;
pub use self::projection::projected_amount;

pub mod editor;
pub mod projection;

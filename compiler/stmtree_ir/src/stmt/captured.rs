//! Captured regions: a statement outlined into its own function, together
//! with the variables it captures from the enclosing scope.

use super::{some, Children, StmtNode};
use crate::{
    ArrayLayout, DeclId, ExprId, Locator, SourceLocation, SourceRange, StmtId, Trailing,
    TrailingArrays,
};

/// What a captured region is outlined for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CapturedRegionKind {
    #[default]
    Default,
    OpenMp,
}

/// How one entity is captured.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CaptureKind {
    #[default]
    This,
    ByRef,
}

/// One captured entity: `this` or a variable captured by reference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct VariableCapture {
    kind: CaptureKind,
    loc: SourceLocation,
    var: Option<DeclId>,
}

impl VariableCapture {
    /// # Panics
    /// Panics if a by-reference capture has no variable or a `this`
    /// capture has one.
    #[track_caller]
    pub fn new(kind: CaptureKind, loc: SourceLocation, var: Option<DeclId>) -> Self {
        match kind {
            CaptureKind::This => assert!(var.is_none(), "'this' capture cannot have a variable"),
            CaptureKind::ByRef => assert!(var.is_some(), "capturing by reference must have a variable"),
        }
        VariableCapture { kind, loc, var }
    }

    pub fn kind(&self) -> CaptureKind {
        self.kind
    }

    pub fn loc(&self) -> SourceLocation {
        self.loc
    }

    pub fn captures_this(&self) -> bool {
        self.kind == CaptureKind::This
    }

    pub fn captures_variable(&self) -> bool {
        self.kind == CaptureKind::ByRef
    }

    pub fn captured_var(&self) -> Option<DeclId> {
        self.var
    }
}

/// Region body plus one initializer per captured entity.
///
/// Storage order is the initializers, then the captured statement, then the
/// capture descriptors.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CapturedStmt {
    region_kind: CapturedRegionKind,
    captured_decl: DeclId,
    record_decl: DeclId,
    inits: Trailing<ExprId>,
    captured_stmt: StmtId,
    captures: Trailing<VariableCapture>,
}

impl CapturedStmt {
    /// # Panics
    /// Panics if there is not exactly one initializer per capture.
    #[track_caller]
    pub fn create(
        captured_stmt: StmtId,
        region_kind: CapturedRegionKind,
        captures: &[VariableCapture],
        capture_inits: &[ExprId],
        captured_decl: DeclId,
        record_decl: DeclId,
    ) -> Self {
        assert_eq!(
            capture_inits.len(),
            captures.len(),
            "wrong number of arguments"
        );
        let mut node = Self::create_deserialized(captures.len());
        node.region_kind = region_kind;
        node.captured_decl = captured_decl;
        node.record_decl = record_decl;
        node.captured_stmt = captured_stmt;
        node.set_capture_inits(capture_inits);
        node.set_captures(captures);
        node
    }

    /// Shell with room for `num_captures` captures, filled later.
    pub fn create_deserialized(num_captures: usize) -> Self {
        CapturedStmt {
            region_kind: CapturedRegionKind::Default,
            captured_decl: DeclId::INVALID,
            record_decl: DeclId::INVALID,
            inits: Trailing::with_sections(&[num_captures]),
            captured_stmt: StmtId::INVALID,
            captures: Trailing::with_sections(&[num_captures]),
        }
    }

    pub fn captured_stmt(&self) -> StmtId {
        self.captured_stmt
    }

    pub fn set_captured_stmt(&mut self, stmt: StmtId) {
        self.captured_stmt = stmt;
    }

    pub fn captured_decl(&self) -> DeclId {
        self.captured_decl
    }

    pub fn set_captured_decl(&mut self, decl: DeclId) {
        self.captured_decl = decl;
    }

    pub fn record_decl(&self) -> DeclId {
        self.record_decl
    }

    pub fn set_record_decl(&mut self, decl: DeclId) {
        self.record_decl = decl;
    }

    pub fn region_kind(&self) -> CapturedRegionKind {
        self.region_kind
    }

    pub fn set_region_kind(&mut self, kind: CapturedRegionKind) {
        self.region_kind = kind;
    }

    pub fn capture_inits(&self) -> &[ExprId] {
        self.inits.section(0)
    }

    #[track_caller]
    pub fn set_capture_inits(&mut self, inits: &[ExprId]) {
        self.inits.set_section(0, inits);
    }

    pub fn captures(&self) -> &[VariableCapture] {
        self.captures.section(0)
    }

    #[track_caller]
    pub fn set_captures(&mut self, captures: &[VariableCapture]) {
        self.captures.set_section(0, captures);
    }

    pub fn capture_size(&self) -> usize {
        self.captures.total_len()
    }

    /// Whether `var` is captured by reference.
    ///
    /// Redeclarations of the same variable are not recognized.
    pub fn captures_variable(&self, var: DeclId) -> bool {
        self.captures()
            .iter()
            .any(|capture| capture.captures_variable() && capture.captured_var() == Some(var))
    }
}

impl StmtNode for CapturedStmt {
    const CUSTOM_SOURCE_RANGE: bool = true;

    /// Only the capture initializers; the captured statement belongs to the
    /// outlined function.
    fn children(&self) -> Children {
        self.capture_inits().iter().map(|&init| some(init)).collect()
    }

    fn loc_start(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_start(self.captured_stmt)
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.captured_stmt)
    }

    fn source_range(&self, cx: &Locator<'_>) -> SourceRange {
        cx.stmt_range(self.captured_stmt)
    }

    fn trailing_arrays(&self) -> TrailingArrays {
        smallvec::smallvec![
            ArrayLayout::of::<ExprId>(self.inits.total_len()),
            ArrayLayout::of::<StmtId>(1),
            ArrayLayout::of::<VariableCapture>(self.captures.total_len()),
        ]
    }
}

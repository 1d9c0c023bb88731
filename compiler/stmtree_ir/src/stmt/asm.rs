//! Inline assembly statements in two dialects.
//!
//! `GccAsmStmt` carries a template string plus named, constrained operands.
//! `MsAsmStmt` carries the pre-lexed tokens of a `__asm { ... }` block.
//! Both share `AsmCommon`; `AsmStmt` is the dialect-agnostic view.

use super::{some, Children, StmtNode};
use crate::asm::{
    analyze_template, assemble_pieces, escape_simple_template, AsmStringError, AsmStringPiece,
    AsmTargetInfo, OperandResolver,
};
use crate::{ExprId, Locator, Name, SourceLocation, StringLookup, TokenId};

/// Fields shared by both dialects.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct AsmCommon {
    asm_loc: SourceLocation,
    /// No operands, constraints or clobbers were written.
    is_simple: bool,
    is_volatile: bool,
    num_outputs: u32,
    num_inputs: u32,
    num_clobbers: u32,
}

impl AsmCommon {
    /// Header with no operands; the dialect constructor records the counts.
    pub fn new(asm_loc: SourceLocation, is_simple: bool, is_volatile: bool) -> Self {
        AsmCommon {
            asm_loc,
            is_simple,
            is_volatile,
            num_outputs: 0,
            num_inputs: 0,
            num_clobbers: 0,
        }
    }

    fn set_counts(&mut self, num_outputs: usize, num_inputs: usize, num_clobbers: usize) {
        self.num_outputs = count(num_outputs);
        self.num_inputs = count(num_inputs);
        self.num_clobbers = count(num_clobbers);
    }

    pub fn asm_loc(&self) -> SourceLocation {
        self.asm_loc
    }

    pub fn is_simple(&self) -> bool {
        self.is_simple
    }

    pub fn is_volatile(&self) -> bool {
        self.is_volatile
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs as usize
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs as usize
    }

    pub fn num_clobbers(&self) -> usize {
        self.num_clobbers as usize
    }
}

#[track_caller]
fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or_else(|_| panic!("{n} asm operands exceed u32::MAX"))
}

fn copy_strs(strs: &[&str]) -> Box<[Box<str>]> {
    strs.iter().map(|&s| Box::from(s)).collect()
}

/// One operand as written: `[name] "constraint" (expr)`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct AsmOperand<'a> {
    pub name: Option<Name>,
    pub constraint: &'a str,
    pub expr: ExprId,
}

impl<'a> AsmOperand<'a> {
    pub fn new(constraint: &'a str, expr: ExprId) -> Self {
        AsmOperand {
            name: None,
            constraint,
            expr,
        }
    }

    pub fn named(name: Name, constraint: &'a str, expr: ExprId) -> Self {
        AsmOperand {
            name: Some(name),
            constraint,
            expr,
        }
    }
}

/// `asm volatile ("template" : outputs : inputs : clobbers)`
///
/// Names, constraints and expressions are parallel arrays: outputs first,
/// then inputs.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GccAsmStmt {
    common: AsmCommon,
    rparen_loc: SourceLocation,
    asm_string: Box<str>,
    names: Box<[Option<Name>]>,
    constraints: Box<[Box<str>]>,
    exprs: Box<[ExprId]>,
    clobbers: Box<[Box<str>]>,
}

impl GccAsmStmt {
    pub fn new(
        common: AsmCommon,
        asm_string: &str,
        outputs: &[AsmOperand<'_>],
        inputs: &[AsmOperand<'_>],
        clobbers: &[&str],
        rparen_loc: SourceLocation,
    ) -> Self {
        let mut node = GccAsmStmt {
            common,
            rparen_loc,
            asm_string: asm_string.into(),
            names: Box::default(),
            constraints: Box::default(),
            exprs: Box::default(),
            clobbers: Box::default(),
        };
        let operands: Vec<&AsmOperand<'_>> = outputs.iter().chain(inputs).collect();
        let names: Vec<Option<Name>> = operands.iter().map(|op| op.name).collect();
        let constraints: Vec<&str> = operands.iter().map(|op| op.constraint).collect();
        let exprs: Vec<ExprId> = operands.iter().map(|op| op.expr).collect();
        node.set_outputs_inputs_and_clobbers(
            &names,
            &constraints,
            &exprs,
            outputs.len(),
            inputs.len(),
            clobbers,
        );
        node
    }

    /// Replace every operand array and the clobber list at once.
    ///
    /// # Panics
    /// Panics unless `names`, `constraints` and `exprs` all hold exactly
    /// `num_outputs + num_inputs` entries.
    #[track_caller]
    pub fn set_outputs_inputs_and_clobbers(
        &mut self,
        names: &[Option<Name>],
        constraints: &[&str],
        exprs: &[ExprId],
        num_outputs: usize,
        num_inputs: usize,
        clobbers: &[&str],
    ) {
        let num_exprs = num_outputs + num_inputs;
        assert_eq!(names.len(), num_exprs, "wrong number of operand names");
        assert_eq!(constraints.len(), num_exprs, "wrong number of constraints");
        assert_eq!(exprs.len(), num_exprs, "wrong number of operand expressions");

        self.common
            .set_counts(num_outputs, num_inputs, clobbers.len());
        self.names = names.into();
        self.constraints = copy_strs(constraints);
        self.exprs = exprs.into();
        self.clobbers = copy_strs(clobbers);
    }

    pub fn common(&self) -> &AsmCommon {
        &self.common
    }

    pub fn asm_string(&self) -> &str {
        &self.asm_string
    }

    pub fn rparen_loc(&self) -> SourceLocation {
        self.rparen_loc
    }

    #[track_caller]
    pub fn output_name(&self, i: usize) -> Option<Name> {
        assert!(i < self.common.num_outputs(), "output {i} out of range");
        self.names[i]
    }

    #[track_caller]
    pub fn output_constraint(&self, i: usize) -> &str {
        assert!(i < self.common.num_outputs(), "output {i} out of range");
        &self.constraints[i]
    }

    #[track_caller]
    pub fn output_expr(&self, i: usize) -> ExprId {
        assert!(i < self.common.num_outputs(), "output {i} out of range");
        self.exprs[i]
    }

    #[track_caller]
    pub fn input_name(&self, i: usize) -> Option<Name> {
        self.names[self.input_index(i)]
    }

    #[track_caller]
    pub fn input_constraint(&self, i: usize) -> &str {
        &self.constraints[self.input_index(i)]
    }

    #[track_caller]
    pub fn input_expr(&self, i: usize) -> ExprId {
        self.exprs[self.input_index(i)]
    }

    #[track_caller]
    pub fn set_input_expr(&mut self, i: usize, expr: ExprId) {
        let index = self.input_index(i);
        self.exprs[index] = expr;
    }

    #[track_caller]
    fn input_index(&self, i: usize) -> usize {
        assert!(i < self.common.num_inputs(), "input {i} out of range");
        self.common.num_outputs() + i
    }

    #[track_caller]
    pub fn clobber(&self, i: usize) -> &str {
        &self.clobbers[i]
    }

    /// Operand number for `%[name]`: outputs are numbered first, then inputs.
    pub fn named_operand(&self, name: &str, names: &dyn StringLookup) -> Option<u32> {
        let wanted = names.find(name)?;
        let index = self.names.iter().position(|n| *n == Some(wanted))?;
        u32::try_from(index).ok()
    }

    pub fn is_output_plus_constraint(&self, i: usize) -> bool {
        self.output_constraint(i).starts_with('+')
    }

    /// Number of outputs with a read-write (`+`) constraint.
    pub fn num_plus_operands(&self) -> usize {
        (0..self.common.num_outputs())
            .filter(|&i| self.is_output_plus_constraint(i))
            .count()
    }

    /// Split the template into literal and operand pieces.
    pub fn analyze_asm_string(
        &self,
        names: &dyn StringLookup,
        target: &AsmTargetInfo,
    ) -> Result<Vec<AsmStringPiece>, AsmStringError> {
        if self.common.is_simple() {
            return Ok(vec![escape_simple_template(&self.asm_string)]);
        }
        let operands = GccOperands { stmt: self, names };
        let result = analyze_template(&self.asm_string, &operands, target);
        if let Err(err) = &result {
            tracing::debug!(%err, template = %self.asm_string, "inline asm template rejected");
        }
        result
    }

    /// The template in the backend's positional operand syntax.
    ///
    /// # Panics
    /// Panics if the template does not scan; callers validate with
    /// `analyze_asm_string` first.
    #[track_caller]
    pub fn generate_asm_string(&self, names: &dyn StringLookup, target: &AsmTargetInfo) -> String {
        match self.analyze_asm_string(names, target) {
            Ok(pieces) => assemble_pieces(&pieces),
            Err(err) => panic!("inline asm template was not validated: {err}"),
        }
    }
}

struct GccOperands<'a> {
    stmt: &'a GccAsmStmt,
    names: &'a dyn StringLookup,
}

impl OperandResolver for GccOperands<'_> {
    fn num_operands(&self) -> u32 {
        let common = &self.stmt.common;
        count(common.num_outputs() + self.stmt.num_plus_operands() + common.num_inputs())
    }

    fn named_operand(&self, name: &str) -> Option<u32> {
        self.stmt.named_operand(name, self.names)
    }
}

impl StmtNode for GccAsmStmt {
    fn children(&self) -> Children {
        self.exprs.iter().map(|&expr| some(expr)).collect()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.common.asm_loc
    }

    fn loc_end(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.rparen_loc
    }
}

/// `__asm { ... }`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MsAsmStmt {
    common: AsmCommon,
    lbrace_loc: SourceLocation,
    end_loc: SourceLocation,
    asm_string: Box<str>,
    asm_toks: Box<[TokenId]>,
    constraints: Box<[Box<str>]>,
    exprs: Box<[ExprId]>,
    clobbers: Box<[Box<str>]>,
}

impl MsAsmStmt {
    /// # Panics
    /// Panics unless `constraints` and `exprs` both hold exactly
    /// `num_outputs + num_inputs` entries.
    #[track_caller]
    pub fn new(
        common: AsmCommon,
        lbrace_loc: SourceLocation,
        asm_toks: &[TokenId],
        num_outputs: usize,
        num_inputs: usize,
        constraints: &[&str],
        exprs: &[ExprId],
        asm_string: &str,
        clobbers: &[&str],
        end_loc: SourceLocation,
    ) -> Self {
        let num_exprs = num_outputs + num_inputs;
        assert_eq!(exprs.len(), num_exprs, "wrong number of operand expressions");
        assert_eq!(constraints.len(), num_exprs, "wrong number of constraints");

        let mut common = common;
        common.set_counts(num_outputs, num_inputs, clobbers.len());
        MsAsmStmt {
            common,
            lbrace_loc,
            end_loc,
            asm_string: asm_string.into(),
            asm_toks: asm_toks.into(),
            constraints: copy_strs(constraints),
            exprs: exprs.into(),
            clobbers: copy_strs(clobbers),
        }
    }

    pub fn common(&self) -> &AsmCommon {
        &self.common
    }

    pub fn lbrace_loc(&self) -> SourceLocation {
        self.lbrace_loc
    }

    pub fn has_braces(&self) -> bool {
        self.lbrace_loc.is_valid()
    }

    pub fn asm_string(&self) -> &str {
        &self.asm_string
    }

    pub fn asm_toks(&self) -> &[TokenId] {
        &self.asm_toks
    }

    #[track_caller]
    pub fn output_constraint(&self, i: usize) -> &str {
        assert!(i < self.common.num_outputs(), "output {i} out of range");
        &self.constraints[i]
    }

    #[track_caller]
    pub fn output_expr(&self, i: usize) -> ExprId {
        assert!(i < self.common.num_outputs(), "output {i} out of range");
        self.exprs[i]
    }

    #[track_caller]
    pub fn input_constraint(&self, i: usize) -> &str {
        &self.constraints[self.input_index(i)]
    }

    #[track_caller]
    pub fn input_expr(&self, i: usize) -> ExprId {
        self.exprs[self.input_index(i)]
    }

    #[track_caller]
    pub fn set_input_expr(&mut self, i: usize, expr: ExprId) {
        let index = self.input_index(i);
        self.exprs[index] = expr;
    }

    #[track_caller]
    fn input_index(&self, i: usize) -> usize {
        assert!(i < self.common.num_inputs(), "input {i} out of range");
        self.common.num_outputs() + i
    }

    #[track_caller]
    pub fn clobber(&self, i: usize) -> &str {
        &self.clobbers[i]
    }

    pub fn is_output_plus_constraint(&self, i: usize) -> bool {
        self.output_constraint(i).starts_with('+')
    }

    /// The stored source text, unchanged. Operand references in this
    /// dialect are not renumbered.
    pub fn generate_asm_string(&self) -> String {
        self.asm_string.to_string()
    }
}

impl StmtNode for MsAsmStmt {
    fn children(&self) -> Children {
        self.exprs.iter().map(|&expr| some(expr)).collect()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.common.asm_loc
    }

    fn loc_end(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.end_loc
    }
}

/// Either inline assembly dialect, with the shared accessors.
#[derive(Copy, Clone, Debug)]
pub enum AsmStmt<'a> {
    Gcc(&'a GccAsmStmt),
    Ms(&'a MsAsmStmt),
}

impl<'a> AsmStmt<'a> {
    pub fn common(self) -> &'a AsmCommon {
        match self {
            AsmStmt::Gcc(node) => &node.common,
            AsmStmt::Ms(node) => &node.common,
        }
    }

    pub fn is_simple(self) -> bool {
        self.common().is_simple()
    }

    pub fn is_volatile(self) -> bool {
        self.common().is_volatile()
    }

    pub fn num_outputs(self) -> usize {
        self.common().num_outputs()
    }

    pub fn num_inputs(self) -> usize {
        self.common().num_inputs()
    }

    pub fn num_clobbers(self) -> usize {
        self.common().num_clobbers()
    }

    #[track_caller]
    pub fn output_constraint(self, i: usize) -> &'a str {
        match self {
            AsmStmt::Gcc(node) => node.output_constraint(i),
            AsmStmt::Ms(node) => node.output_constraint(i),
        }
    }

    #[track_caller]
    pub fn output_expr(self, i: usize) -> ExprId {
        match self {
            AsmStmt::Gcc(node) => node.output_expr(i),
            AsmStmt::Ms(node) => node.output_expr(i),
        }
    }

    #[track_caller]
    pub fn input_constraint(self, i: usize) -> &'a str {
        match self {
            AsmStmt::Gcc(node) => node.input_constraint(i),
            AsmStmt::Ms(node) => node.input_constraint(i),
        }
    }

    #[track_caller]
    pub fn input_expr(self, i: usize) -> ExprId {
        match self {
            AsmStmt::Gcc(node) => node.input_expr(i),
            AsmStmt::Ms(node) => node.input_expr(i),
        }
    }

    #[track_caller]
    pub fn clobber(self, i: usize) -> &'a str {
        match self {
            AsmStmt::Gcc(node) => node.clobber(i),
            AsmStmt::Ms(node) => node.clobber(i),
        }
    }

    pub fn is_output_plus_constraint(self, i: usize) -> bool {
        self.output_constraint(i).starts_with('+')
    }

    pub fn num_plus_operands(self) -> usize {
        (0..self.num_outputs())
            .filter(|&i| self.is_output_plus_constraint(i))
            .count()
    }

    /// The template in the backend's syntax; see the dialect methods.
    pub fn generate_asm_string(self, names: &dyn StringLookup, target: &AsmTargetInfo) -> String {
        match self {
            AsmStmt::Gcc(node) => node.generate_asm_string(names, target),
            AsmStmt::Ms(node) => node.generate_asm_string(),
        }
    }
}

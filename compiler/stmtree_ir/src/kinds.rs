//! Statement kind registry.
//!
//! The set of statement kinds is closed and defined once, in `stmt/mod.rs`,
//! through `define_stmt_kinds!`. From that single list the macro derives the
//! `StmtClass` tag, the `Stmt` sum type, kind-dispatched traversal and a
//! compile-time check that every kind implements `StmtNode`.
//!
//! `KindRegistry` layers the runtime side on top: per-kind construction
//! counters and the statistics report.

use crate::stmt::StmtClass;
use std::cell::Cell;
use std::fmt;

/// Environment variable that turns on construction statistics.
pub const STATS_ENV_VAR: &str = "STMTREE_STMT_STATS";

/// Generate the statement kind tables from one list of `Variant(Type)` pairs.
///
/// Adding a kind to the list without implementing `StmtNode` for its type is
/// a compile error.
macro_rules! define_stmt_kinds {
    ($($(#[$doc:meta])* $variant:ident($ty:ident),)*) => {
        /// Runtime tag of a statement kind.
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[repr(u8)]
        pub enum StmtClass {
            $($(#[$doc])* $variant,)*
        }

        impl StmtClass {
            /// Every kind, in declaration order.
            pub const ALL: &'static [StmtClass] = &[$(StmtClass::$variant,)*];

            /// Number of kinds.
            pub const COUNT: usize = Self::ALL.len();

            /// Dense index, usable for per-kind tables.
            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Name of the node type for this kind.
            pub const fn name(self) -> &'static str {
                match self {
                    $(StmtClass::$variant => stringify!($ty),)*
                }
            }

            /// In-memory size of a node of this kind, without trailing arrays.
            pub const fn size(self) -> usize {
                match self {
                    $(StmtClass::$variant => ::std::mem::size_of::<$ty>(),)*
                }
            }

            /// Whether the kind computes its source range directly instead of
            /// composing it from `loc_start` and `loc_end`.
            pub const fn overrides_source_range(self) -> bool {
                match self {
                    $(StmtClass::$variant => <$ty as StmtNode>::CUSTOM_SOURCE_RANGE,)*
                }
            }
        }

        /// A statement node of any kind.
        #[derive(Clone, Eq, PartialEq, Debug)]
        pub enum Stmt {
            $($variant($ty),)*
        }

        impl Stmt {
            #[inline]
            pub const fn class(&self) -> StmtClass {
                match self {
                    $(Stmt::$variant(_) => StmtClass::$variant,)*
                }
            }

            /// Direct sub-nodes in source order. Absent optional children are `None`.
            pub fn children(&self) -> Children {
                match self {
                    $(Stmt::$variant(node) => StmtNode::children(node),)*
                }
            }

            pub fn loc_start(&self, cx: &Locator<'_>) -> SourceLocation {
                match self {
                    $(Stmt::$variant(node) => StmtNode::loc_start(node, cx),)*
                }
            }

            pub fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
                match self {
                    $(Stmt::$variant(node) => StmtNode::loc_end(node, cx),)*
                }
            }

            pub fn source_range(&self, cx: &Locator<'_>) -> SourceRange {
                match self {
                    $(Stmt::$variant(node) => StmtNode::source_range(node, cx),)*
                }
            }

            /// Trailing arrays of this node, in storage order.
            pub fn trailing_arrays(&self) -> TrailingArrays {
                match self {
                    $(Stmt::$variant(node) => StmtNode::trailing_arrays(node),)*
                }
            }
        }

        $(
            impl From<$ty> for Stmt {
                fn from(node: $ty) -> Self {
                    Stmt::$variant(node)
                }
            }

            impl StmtVariant for $ty {
                const CLASS: StmtClass = StmtClass::$variant;

                #[inline]
                fn cast(stmt: &Stmt) -> Option<&Self> {
                    match stmt {
                        Stmt::$variant(node) => Some(node),
                        _ => None,
                    }
                }

                #[inline]
                fn cast_mut(stmt: &mut Stmt) -> Option<&mut Self> {
                    match stmt {
                        Stmt::$variant(node) => Some(node),
                        _ => None,
                    }
                }
            }
        )*

        // Every kind must provide the node capability set.
        const _: () = {
            const fn implements_stmt_node<T: StmtNode>() {}
            $(implements_stmt_node::<$ty>();)*
        };
    };
}

pub(crate) use define_stmt_kinds;

/// Static facts about one statement kind.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct KindInfo {
    pub class: StmtClass,
    pub name: &'static str,
    pub size: usize,
    pub overrides_source_range: bool,
}

impl KindInfo {
    const fn of(class: StmtClass) -> Self {
        KindInfo {
            class,
            name: class.name(),
            size: class.size(),
            overrides_source_range: class.overrides_source_range(),
        }
    }
}

/// Per-kind name, size and construction counters.
///
/// The table is built eagerly on construction and never mutated afterwards;
/// only the counters change, and only while statistics are enabled.
pub struct KindRegistry {
    infos: [KindInfo; StmtClass::COUNT],
    counters: [Cell<u64>; StmtClass::COUNT],
    statistics: Cell<bool>,
}

impl KindRegistry {
    /// Registry with statistics collection disabled.
    pub fn new() -> Self {
        Self::with_statistics(false)
    }

    pub fn with_statistics(enabled: bool) -> Self {
        KindRegistry {
            infos: std::array::from_fn(|i| KindInfo::of(StmtClass::ALL[i])),
            counters: std::array::from_fn(|_| Cell::new(0)),
            statistics: Cell::new(enabled),
        }
    }

    /// Registry configured from the environment.
    ///
    /// Statistics are enabled when `STMTREE_STMT_STATS` is set to anything
    /// other than `0` or the empty string.
    pub fn from_env() -> Self {
        let enabled = std::env::var(STATS_ENV_VAR).is_ok_and(|v| !v.is_empty() && v != "0");
        Self::with_statistics(enabled)
    }

    /// Turn statistics collection on. Idempotent.
    pub fn enable_statistics(&self) {
        if !self.statistics.replace(true) {
            tracing::debug!("statement construction statistics enabled");
        }
    }

    #[inline]
    pub fn statistics_enabled(&self) -> bool {
        self.statistics.get()
    }

    #[inline]
    pub fn info(&self, class: StmtClass) -> &KindInfo {
        &self.infos[class.index()]
    }

    #[inline]
    pub fn name_of(&self, class: StmtClass) -> &'static str {
        self.info(class).name
    }

    #[inline]
    pub fn size_of(&self, class: StmtClass) -> usize {
        self.info(class).size
    }

    /// Count one constructed node. No-op while statistics are disabled.
    #[inline]
    pub fn record_construction(&self, class: StmtClass) {
        if self.statistics.get() {
            let counter = &self.counters[class.index()];
            counter.set(counter.get() + 1);
        }
    }

    #[inline]
    pub fn count_constructed(&self, class: StmtClass) -> u64 {
        self.counters[class.index()].get()
    }

    /// Snapshot of the counters of every kind constructed at least once.
    pub fn stats(&self) -> StatsReport {
        let entries: Vec<StatsEntry> = self
            .infos
            .iter()
            .filter_map(|info| {
                let count = self.count_constructed(info.class);
                (count != 0).then_some(StatsEntry {
                    name: info.name,
                    count,
                    size: info.size,
                })
            })
            .collect();
        let total_count = entries.iter().map(|e| e.count).sum();
        let total_bytes = entries.iter().map(StatsEntry::bytes).sum();
        StatsReport {
            entries,
            total_count,
            total_bytes,
        }
    }

    /// Write the statistics report to stderr.
    pub fn print_stats(&self) {
        eprint!("{}", self.stats());
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindRegistry")
            .field("kinds", &StmtClass::COUNT)
            .field("statistics", &self.statistics.get())
            .finish_non_exhaustive()
    }
}

/// One line of the statistics report.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StatsEntry {
    pub name: &'static str,
    pub count: u64,
    pub size: usize,
}

impl StatsEntry {
    /// Bytes attributed to this kind: count times per-node size.
    pub fn bytes(&self) -> u64 {
        self.count * self.size as u64
    }
}

/// Construction statistics across all kinds.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StatsReport {
    pub entries: Vec<StatsEntry>,
    pub total_count: u64,
    pub total_bytes: u64,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n*** Stmt/Expr Stats:")?;
        writeln!(f, "  {} stmts/exprs total.", self.total_count)?;
        for entry in &self.entries {
            writeln!(
                f,
                "    {} {}, {} each ({} bytes)",
                entry.count,
                entry.name,
                entry.size,
                entry.bytes()
            )?;
        }
        writeln!(f, "Total bytes = {}", self.total_bytes)
    }
}

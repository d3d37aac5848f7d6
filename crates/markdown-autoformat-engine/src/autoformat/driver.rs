use log::debug;

use crate::tree::{BlockNode, DocumentAccess};

use super::{
    context::ScanningContext,
    criteria::{CodeBlockRule, Criterion, HorizontalRuleFactory, Rewrite},
    error::AutoformatError,
};

/// Drives autoformat sweeps over a document.
///
/// Holds the injected criteria catalog (in priority order), the fixed
/// code-block rule and the optional horizontal-rule factory. One
/// `Autoformatter` can run any number of sweeps; each sweep gets its own
/// [`ScanningContext`].
pub struct Autoformatter<'a, C> {
    pub(crate) catalog: &'a [C],
    pub(crate) code_block: &'a dyn CodeBlockRule<C>,
    pub(crate) horizontal_rule: Option<HorizontalRuleFactory<'a>>,
    max_restarts: Option<usize>,
}

/// What one call to [`Autoformatter::autoformat_document`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Times the sweep restarted because the block count changed.
    pub restarts: usize,
    /// Rewrites invoked across the whole sweep.
    pub rewrites: usize,
    /// Block evaluations, counting re-evaluations after a restart.
    pub blocks_visited: usize,
}

impl<'a, C> Autoformatter<'a, C> {
    pub fn new(catalog: &'a [C], code_block: &'a dyn CodeBlockRule<C>) -> Self {
        Self {
            catalog,
            code_block,
            horizontal_rule: None,
            max_restarts: None,
        }
    }

    /// Enables horizontal-rule rewrites by supplying the decorator factory.
    pub fn with_horizontal_rule(mut self, factory: HorizontalRuleFactory<'a>) -> Self {
        self.horizontal_rule = Some(factory);
        self
    }

    /// Fails with [`AutoformatError::DidNotConverge`] once a sweep has
    /// restarted more than `cap` times. Unbounded by default.
    pub fn with_max_restarts(mut self, cap: Option<usize>) -> Self {
        self.max_restarts = cap;
        self
    }

    pub fn catalog(&self) -> &'a [C] {
        self.catalog
    }
}

impl<'a, C: Criterion> Autoformatter<'a, C> {
    /// Sweeps `document` until a full pass leaves the block count unchanged.
    ///
    /// After every block the per-block context is reset and the block count
    /// re-read. A changed count means a rewrite inserted or removed blocks at or
    /// after the current index, so the pass restarts from that same index
    /// against the new sequence: earlier blocks are final, the current one may
    /// need another look.
    ///
    /// Errors from the matcher or the rewrite abort the sweep; blocks already
    /// rewritten stay rewritten.
    pub fn autoformat_document<D, R>(
        &self,
        document: &mut D,
        rewrite: &mut R,
    ) -> Result<SweepReport, AutoformatError>
    where
        D: DocumentAccess,
        R: Rewrite<C>,
    {
        let mut context = ScanningContext::new();
        let mut report = SweepReport::default();
        let mut start_index = 0;
        let mut done = false;

        while !done {
            done = true;
            let count = document.block_count();

            for i in start_index..count {
                if document.block(i).is_some_and(BlockNode::is_element) {
                    report.rewrites += self.try_convert_block(&mut context, document, i, rewrite)?;
                }
                report.blocks_visited += 1;
                context.reset();

                let new_count = document.block_count();
                if new_count != count {
                    debug!("Block count changed from {count} to {new_count} at block {i}, restarting");
                    report.restarts += 1;
                    if let Some(cap) = self.max_restarts
                        && report.restarts > cap
                    {
                        return Err(AutoformatError::DidNotConverge {
                            restarts: report.restarts,
                        });
                    }
                    start_index = i;
                    done = false;
                    break;
                }
            }
        }

        debug!(
            "Autoformat converged: {} rewrites, {} restarts",
            report.rewrites, report.restarts
        );
        Ok(report)
    }
}

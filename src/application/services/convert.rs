//! Conversion service
//!
//! Reads a willow proof, flattens it, and writes the yew node records next to it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::codec::{decode_willow, decode_yew, encode_yew};
use crate::application::records::{assemble, graph_from_records};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    unflatten, Branch, DomainError, FlatGraph, Flattener, CLOSED_TERMINATOR, OPEN_TERMINATOR,
};
use crate::infrastructure::traits::FileSystem;

/// Result of writing one yew file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub nodes: usize,
    pub antecedents: usize,
}

/// Shape of a proof, as reported by `check`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofSummary {
    pub nodes: usize,
    pub premises: usize,
    pub antecedents: usize,
    pub branches: usize,
    /// Branches without sub-branches
    pub leaves: usize,
    pub depth: usize,
    /// Branches ending in the closed marker
    pub closed: usize,
    /// Branches ending in the open marker
    pub open: usize,
    /// Branches ending in anything else
    pub unfinished: usize,
}

/// Service for turning willow trees into yew graphs.
pub struct ConversionService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl ConversionService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Input path with its extension replaced by the configured output extension.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        input.with_extension(&self.settings.output_extension)
    }

    fn read(&self, input: &Path) -> ApplicationResult<String> {
        if !self.fs.is_file(input) {
            return Err(ApplicationError::InputNotFound(input.to_path_buf()));
        }
        self.fs.read_to_string(input).with_path_context("read", input)
    }

    /// Reads and parses a willow proof tree.
    #[instrument(level = "debug", skip(self))]
    pub fn load_tree(&self, input: &Path) -> ApplicationResult<Branch> {
        let content = self.read(input)?;
        decode_willow(&content, input)
    }

    /// Reads yew records back into a graph.
    #[instrument(level = "debug", skip(self))]
    pub fn load_graph(&self, input: &Path) -> ApplicationResult<FlatGraph> {
        let content = self.read(input)?;
        let records = decode_yew(&content, input)?;
        Ok(graph_from_records(records)?)
    }

    /// Flattens `tree` using the configured reference policy.
    pub fn flatten(&self, tree: &Branch) -> ApplicationResult<FlatGraph> {
        let flattened = Flattener::new(tree)
            .strict(self.settings.strict_references)
            .flatten()?;
        Ok(flattened.into_graph()?)
    }

    /// Converts `input` and writes the records to `output`, or next to the input.
    ///
    /// Nothing is written unless the whole graph was built and serialized.
    #[instrument(level = "debug", skip(self))]
    pub fn convert(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> ApplicationResult<ConversionReport> {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.output_path(input));
        if output == input {
            return Err(ApplicationError::OutputIsInput(output));
        }
        if !self.settings.overwrite && self.fs.exists(&output) {
            return Err(ApplicationError::OutputExists(output));
        }

        let tree = self.load_tree(input)?;
        let graph = self.flatten(&tree)?;
        let json = encode_yew(&assemble(&graph), self.settings.indent)?;
        debug!(bytes = json.len(), "encoded records");

        self.fs
            .write_atomic(&output, &json)
            .with_path_context("write", &output)?;
        info!("wrote {} nodes to {}", graph.len(), output.display());

        Ok(ConversionReport {
            input: input.to_path_buf(),
            output,
            nodes: graph.len(),
            antecedents: graph.antecedent_count(),
        })
    }

    /// Validates a willow or yew file without writing anything.
    ///
    /// Files carrying the output extension are read as yew records; anything else
    /// as a willow tree. Either way the graph is rebuilt into a tree and flattened
    /// again, which must reproduce the same numbering.
    #[instrument(level = "debug", skip(self))]
    pub fn check(&self, input: &Path) -> ApplicationResult<ProofSummary> {
        let is_yew = input
            .extension()
            .is_some_and(|ext| ext == self.settings.output_extension.as_str());
        let graph = if is_yew {
            self.load_graph(input)?
        } else {
            self.flatten(&self.load_tree(input)?)?
        };

        let tree = unflatten(&graph)?;
        let reflattened = self.flatten(&tree)?;
        if let Some(difference) = numbering_difference(&graph, &reflattened) {
            return Err(DomainError::MalformedGraph(difference).into());
        }

        Ok(summarize(&graph, &tree))
    }
}

/// Compares everything except antecedents; those depend on visiting order,
/// which changes when single sub-branches are merged into their parent.
fn numbering_difference(original: &FlatGraph, rebuilt: &FlatGraph) -> Option<String> {
    if original.len() != rebuilt.len() {
        return Some(format!(
            "re-flattening yields {} nodes instead of {}",
            rebuilt.len(),
            original.len()
        ));
    }
    original
        .nodes()
        .iter()
        .zip(rebuilt.nodes())
        .find(|(a, b)| {
            a.text != b.text
                || a.premise != b.premise
                || a.parent != b.parent
                || a.children.as_slice() != b.children.as_slice()
                || a.decomposition != b.decomposition
        })
        .map(|(a, b)| {
            format!(
                "node {} does not survive re-flattening: {:?} became {:?}",
                a.id, a, b
            )
        })
}

fn summarize(graph: &FlatGraph, tree: &Branch) -> ProofSummary {
    let mut summary = ProofSummary {
        nodes: graph.len(),
        premises: graph.nodes().iter().filter(|n| n.premise).count(),
        antecedents: graph.antecedent_count(),
        branches: tree.branch_count(),
        leaves: tree.leaf_count(),
        depth: tree.depth(),
        ..ProofSummary::default()
    };
    for leaf in graph.leaves() {
        match leaf.text.as_str() {
            CLOSED_TERMINATOR => summary.closed += 1,
            OPEN_TERMINATOR => summary.open += 1,
            _ => summary.unfinished += 1,
        }
    }
    summary
}

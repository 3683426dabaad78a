use super::{
    CreateTasksFromObjectivesTool, FinalizeCheckinTool, GetCheckinFileInfoTool,
    GetCurrentCheckinTool, GetHistoryTool, GetLastCheckinTool, ListTasksTool, MarkTaskDoneTool,
    ResetCurrentCheckinTool, SaveCheckinTool, SetCheckinFieldTool, SummaryTool, Tool,
    ToolRegistry, default_middleware_chain,
};
use crate::journal::Journal;
use std::sync::Arc;

/// Every journal tool, each holding a handle to the same journal.
pub fn all_tools(journal: &Arc<Journal>) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(SetCheckinFieldTool::new(Arc::clone(journal))),
        Box::new(GetCurrentCheckinTool::new(Arc::clone(journal))),
        Box::new(SaveCheckinTool::new(Arc::clone(journal))),
        Box::new(GetLastCheckinTool::new(Arc::clone(journal))),
        Box::new(GetHistoryTool::new(Arc::clone(journal))),
        Box::new(SummaryTool::new(Arc::clone(journal))),
        Box::new(CreateTasksFromObjectivesTool::new(Arc::clone(journal))),
        Box::new(ListTasksTool::new(Arc::clone(journal))),
        Box::new(MarkTaskDoneTool::new(Arc::clone(journal))),
        Box::new(FinalizeCheckinTool::new(Arc::clone(journal))),
        Box::new(ResetCurrentCheckinTool::new(Arc::clone(journal))),
        Box::new(GetCheckinFileInfoTool::new(Arc::clone(journal))),
    ]
}

/// Registry with all journal tools behind the default middleware chain.
pub fn build_registry(journal: &Arc<Journal>) -> ToolRegistry {
    let mut registry = ToolRegistry::new(default_middleware_chain());
    for tool in all_tools(journal) {
        registry.register(tool);
    }
    registry
}

/// Generate tool descriptions for listings
///
/// Returns a vector of (`tool_name`, description) tuples, ordered by name.
pub fn tool_descriptions(registry: &ToolRegistry) -> Vec<(String, String)> {
    registry
        .specs()
        .into_iter()
        .map(|spec| (spec.name, spec.description))
        .collect()
}

pub mod checkin;
pub mod common;
pub mod factory;
pub mod history;
pub mod middleware;
pub mod registry;
pub mod tasks;
pub mod traits;

pub use checkin::{
    FinalizeCheckinTool, GetCheckinFileInfoTool, GetCurrentCheckinTool, ResetCurrentCheckinTool,
    SaveCheckinTool, SetCheckinFieldTool,
};
pub use factory::{all_tools, build_registry, tool_descriptions};
pub use history::{GetHistoryTool, GetLastCheckinTool, SummaryTool};
pub use middleware::{ArgumentShapeMiddleware, AuditMiddleware, default_middleware_chain};
pub use registry::ToolRegistry;
pub use tasks::{CreateTasksFromObjectivesTool, ListTasksTool, MarkTaskDoneTool};
pub use traits::{ExecutionContext, MiddlewareDecision, Tool, ToolMiddleware, ToolResult, ToolSpec};

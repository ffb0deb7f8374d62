/// MCP server for multithreading pitfall insights.
///
/// Exposes two tools:
/// - `multithreading_pitfalls`: Top pitfall categories found in the local thread dataset
/// - `list_pitfall_categories`: The fixed P1..P9 taxonomy
use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use crate::service::InsightService;
use pitfall_core::api::{CategoryListResponse, MultithreadingPitfallResponse, PitfallQueryParams};

#[derive(Clone)]
pub struct PitfallInsightsServer {
    service: InsightService,
    tool_router: ToolRouter<PitfallInsightsServer>,
}

impl PitfallInsightsServer {
    pub fn new(service: InsightService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl PitfallInsightsServer {
    #[tool(description = "Classify concurrency questions in the local dataset into the P1-P9 multithreading pitfall taxonomy and return the most frequent categories with counts and up to three example question ids.")]
    async fn multithreading_pitfalls(
        &self,
        Parameters(params): Parameters<PitfallQueryParams>,
    ) -> Result<Json<MultithreadingPitfallResponse>, String> {
        let (response, meta) = self
            .service
            .multithreading_pitfalls(&params)
            .await
            .map_err(|e| format!("analysis failed: {e}"))?;

        info!(
            returned = response.pitfalls.len(),
            classified = meta.classified,
            fingerprint = %meta.corpus_fingerprint,
            "multithreading_pitfalls tool served"
        );
        Ok(Json(response))
    }

    #[tool(description = "List the multithreading pitfall taxonomy: category codes P1-P9 with their labels and descriptions.")]
    async fn list_pitfall_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        Ok(Json(self.service.categories()))
    }
}

#[tool_handler]
impl ServerHandler for PitfallInsightsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "pitfall-insights".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Multithreading pitfall insights over a local dataset of Java Q&A threads. \
                 Use multithreading_pitfalls to rank pitfall categories (deadlock, race \
                 condition, visibility, ...) by how many questions fall into each, and \
                 list_pitfall_categories to see what each category code means."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PitfallInsightsServer;

    #[test]
    fn tools_publish_output_schemas() {
        let tools = PitfallInsightsServer::tool_router().list_all();
        for name in ["multithreading_pitfalls", "list_pitfall_categories"] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }
}

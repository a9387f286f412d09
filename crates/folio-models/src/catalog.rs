use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata describing one callable portfolio operation.
///
/// In remote mode the server declares its own descriptor list; this type is
/// what that discovery response deserializes into. The compiled-in list from
/// [`builtin_tools`] is descriptive only and never used to validate dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, ToolParam>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolParam {
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
}

fn param(param_type: &str, required: bool) -> ToolParam {
    ToolParam {
        param_type: param_type.to_string(),
        required,
    }
}

fn tool(name: &str, description: &str, parameters: Vec<(&str, ToolParam)>) -> ToolDescriptor {
    ToolDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        parameters: parameters
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    }
}

/// The fixed descriptor list for the six portfolio operations.
///
/// Returned by the local-process transport (which has no discovery round
/// trip) and exposed by the plugin in direct mode.
pub fn builtin_tools() -> Vec<ToolDescriptor> {
    vec![
        tool(
            "add_to_portfolio",
            "Add a stock to your portfolio",
            vec![
                ("ticker", param("string", true)),
                ("shares", param("number", true)),
                ("purchase_price", param("number", false)),
            ],
        ),
        tool("get_portfolio", "Get current portfolio", vec![]),
        tool(
            "analyze_stock",
            "Analyze a stock",
            vec![("ticker", param("string", true))],
        ),
        tool(
            "should_sell",
            "Check if you should sell a stock",
            vec![("ticker", param("string", true))],
        ),
        tool("find_buy_opportunities", "Find stocks to buy", vec![]),
        tool(
            "generate_portfolio_report",
            "Generate portfolio report",
            vec![],
        ),
    ]
}

use crate::catalog::PatternCatalog;
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::language::SourceKind;
use crate::provider::PaymentProvider;
use crate::types::PaymentFlow;
use tree_sitter::{Node, Parser, TreeCursor};

/// Construct-level scanner for Python sources
pub(crate) struct PythonScanner<'a> {
    catalog: &'a PatternCatalog,
    config: &'a AnalyzerConfig,
    parser: Parser,
}

impl<'a> PythonScanner<'a> {
    pub fn new(catalog: &'a PatternCatalog, config: &'a AnalyzerConfig) -> Result<Self> {
        let ts_language = SourceKind::PythonLike.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| AnalyzerError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self {
            catalog,
            config,
            parser,
        })
    }

    /// Scan a whole module. A tree with syntax errors is a parse failure.
    pub fn scan(&mut self, content: &str, file_path: &str) -> Result<Vec<PaymentFlow>> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| AnalyzerError::parse("Failed to parse source code"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(AnalyzerError::parse(format!(
                "syntax error near line {}",
                first_error_line(root)
            )));
        }

        let mut flows = Vec::new();
        self.visit(content, file_path, root, &mut flows);
        Ok(flows)
    }

    /// Pre-order walk, so flows come out in source order
    fn visit(&self, content: &str, file_path: &str, root: Node, flows: &mut Vec<PaymentFlow>) {
        for node in Preorder::new(root) {
            match node.kind() {
                "import_statement" => self.import_flows(content, file_path, node, flows),
                "import_from_statement" => self.import_from_flow(content, file_path, node, flows),
                "call" => {
                    if let Some(flow) = self.call_flow(content, file_path, node) {
                        flows.push(flow);
                    }
                }
                "function_definition" => {
                    if let Some(flow) = self.function_flow(content, file_path, node) {
                        flows.push(flow);
                    }
                }
                _ => {}
            }
        }
    }

    /// `import stripe, square.client as sq` emits one flow per provider module
    fn import_flows(&self, content: &str, file_path: &str, node: Node, flows: &mut Vec<PaymentFlow>) {
        let line = node.start_position().row + 1;
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            let module = match name.kind() {
                "aliased_import" => name
                    .child_by_field_name("name")
                    .map(|n| node_text(content, n))
                    .unwrap_or_default(),
                _ => node_text(content, name),
            };

            if let Some(provider) = self.config.provider_for_module(module) {
                flows.push(PaymentFlow::new(provider, "import", file_path, line));
            }
        }
    }

    /// `from stripe import Customer` is classified by its module name
    fn import_from_flow(&self, content: &str, file_path: &str, node: Node, flows: &mut Vec<PaymentFlow>) {
        let Some(module) = node.child_by_field_name("module_name") else {
            return;
        };

        if let Some(provider) = self.config.provider_for_module(node_text(content, module)) {
            let line = node.start_position().row + 1;
            flows.push(PaymentFlow::new(provider, "import", file_path, line));
        }
    }

    fn call_flow(&self, content: &str, file_path: &str, node: Node) -> Option<PaymentFlow> {
        let call = call_string(content, node);
        let pattern = self.catalog.first_match(&call)?;
        let line = node.start_position().row + 1;

        Some(PaymentFlow::new(pattern.provider, pattern.flow_type.clone(), file_path, line).with_method(call))
    }

    /// One flow for a payment-named function whose body calls a catalog method
    fn function_flow(&self, content: &str, file_path: &str, node: Node) -> Option<PaymentFlow> {
        let name = node.child_by_field_name("name")?;
        if !self.config.is_payment_function(node_text(content, name)) {
            return None;
        }
        let body = node.child_by_field_name("body")?;

        let mut provider = PaymentProvider::Unknown;
        let mut flow_type = String::new();
        let mut methods = Vec::new();

        let mut calls = Vec::new();
        collect_calls(body, &mut calls);
        for call_node in calls {
            let call = call_string(content, call_node);
            if let Some(pattern) = self.catalog.first_match(&call) {
                provider = pattern.provider;
                flow_type.clone_from(&pattern.flow_type);
                methods.push(call);
            }
        }

        if !provider.is_known() {
            return None;
        }

        let start = node.start_position().row + 1;
        let end = node.end_position().row + 1;
        Some(
            PaymentFlow::new(provider, flow_type, file_path, start)
                .spanning(end)
                .with_methods(methods),
        )
    }
}

/// Dotted call target, e.g. `stripe.Customer.create`.
///
/// Walks attribute accesses from the most specific name towards the root
/// identifier, stepping through subscripts. A root that is neither (a call
/// result, a literal) ends the walk with whatever was collected.
pub(crate) fn call_string(content: &str, call: Node) -> String {
    let Some(function) = call.child_by_field_name("function") else {
        return String::new();
    };

    if function.kind() == "identifier" {
        return node_text(content, function).to_string();
    }
    if function.kind() != "attribute" {
        return String::new();
    }

    let mut parts = Vec::new();
    let mut current = function;
    loop {
        let next = match current.kind() {
            "attribute" => {
                if let Some(attr) = current.child_by_field_name("attribute") {
                    parts.push(node_text(content, attr));
                }
                current.child_by_field_name("object")
            }
            "subscript" => current.child_by_field_name("value"),
            _ => None,
        };

        match next {
            Some(node) if node.kind() == "identifier" => {
                parts.push(node_text(content, node));
                break;
            }
            Some(node) => current = node,
            None => break,
        }
    }

    parts.reverse();
    parts.join(".")
}

/// Iterative pre-order traversal of a subtree.
///
/// Generated code can nest expressions thousands of levels deep, so the
/// walk keeps its position in a `TreeCursor` instead of on the call stack.
struct Preorder<'t> {
    cursor: TreeCursor<'t>,
    done: bool,
}

impl<'t> Preorder<'t> {
    fn new(root: Node<'t>) -> Self {
        Self {
            cursor: root.walk(),
            done: false,
        }
    }
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Node<'t>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        if self.cursor.goto_first_child() {
            return Some(node);
        }
        // the cursor cannot leave the subtree it was created on
        while !self.cursor.goto_next_sibling() {
            if !self.cursor.goto_parent() {
                self.done = true;
                break;
            }
        }
        Some(node)
    }
}

fn collect_calls<'t>(node: Node<'t>, calls: &mut Vec<Node<'t>>) {
    calls.extend(Preorder::new(node).filter(|n| n.kind() == "call"));
}

/// Descend along erroneous children to the first ERROR or MISSING node
fn first_error_line(node: Node) -> usize {
    let mut current = node;
    loop {
        if current.is_error() || current.is_missing() {
            return current.start_position().row + 1;
        }
        let mut cursor = current.walk();
        let next = current.children(&mut cursor).find(|child| child.has_error());
        match next {
            Some(child) => current = child,
            None => return current.start_position().row + 1,
        }
    }
}

fn node_text<'c>(content: &'c str, node: Node) -> &'c str {
    &content[node.start_byte()..node.end_byte()]
}

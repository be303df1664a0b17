use payshift_analyzer::{PaymentProvider, SourceKind};
use payshift_converter::{
    validate_transformation, CodeTransformation, ConversionEngine, ConversionRule, ImportPreamble,
    KeywordRename, RuleCatalog, TransformationType, ENV_RENAMES,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const ALL_KINDS: [SourceKind; 4] = [
    SourceKind::PythonLike,
    SourceKind::JsLike,
    SourceKind::JavaLike,
    SourceKind::Generic,
];

#[test]
fn stripe_python_customer_creation() {
    let engine = ConversionEngine::with_defaults();
    let result = engine.convert(
        "import stripe\nstripe.Customer.create(email='a@b.com')",
        PaymentProvider::Stripe,
        SourceKind::PythonLike,
    );

    assert!(result.transformed_code.contains("import flowglad"));
    assert!(result
        .transformed_code
        .contains("flowglad.customers.create"));
    assert!(!result.transformed_code.contains("stripe.Customer.create"));
    assert_eq!(result.transformation_type, TransformationType::FullConversion);
    assert_eq!(result.line_range, (0, 0));
    assert!(result.file_path.is_empty());
}

#[test]
fn stripe_python_full_file() {
    let engine = ConversionEngine::with_defaults();
    let code = "import os\nimport stripe\n\nstripe.api_key = os.getenv('STRIPE_SECRET_KEY')\n\ndef pay(cid):\n    return stripe.PaymentIntent.create(amount=100, customer=cid, payment_method_types=['card'])\n";
    let result = engine.convert(code, PaymentProvider::Stripe, SourceKind::PythonLike);

    assert_eq!(
        result.transformed_code,
        "import os\nimport flowglad\n\nstripe.api_key = os.getenv('FLOWGLAD_SECRET_KEY')\n\ndef pay(cid):\n    return flowglad.checkout.sessions.create(amount=100, customer_id=cid, payment_methods=['card'])\n"
    );
    assert_eq!(
        result.applied,
        vec![
            "Replace Stripe import",
            "Create payment",
            "Update API key env var"
        ]
    );
}

#[test]
fn preamble_inserted_when_missing() {
    let engine = ConversionEngine::with_defaults();
    let code = "from decimal import Decimal\n\ndef charge(c):\n    return stripe.Refund.create(charge=c)\n";
    let result = engine.convert(code, PaymentProvider::Stripe, SourceKind::PythonLike);

    assert!(result.transformed_code.starts_with(
        "import flowglad\nfrom dotenv import load_dotenv\nload_dotenv()\n\nfrom decimal import Decimal\n"
    ));
    assert!(result.transformed_code.contains("flowglad.refunds.create"));
}

#[test]
fn square_python_conversion() {
    let engine = ConversionEngine::with_defaults();
    let code = "from square.client import Client\n\nclient = Client(access_token=os.environ['SQUARE_ACCESS_TOKEN'])\nresult = client.payments_api.create_payment(body={'source_id': 'cnon', 'amount_money': m})\nclient.refunds_api.refund_payment(body=b)\n";
    let result = engine.convert(code, PaymentProvider::Square, SourceKind::PythonLike);

    assert_eq!(
        result.transformed_code,
        "from flowglad import FlowGlad\n\nclient = FlowGlad(access_token=os.environ['FLOWGLAD_SECRET_KEY'])\nresult = client.payments.create(body={'source_id': 'cnon', 'amount_money': m})\nclient.refunds.create_payment(body=b)\n"
    );
}

#[test]
fn square_keyword_arguments_renamed() {
    let engine = ConversionEngine::with_defaults();
    let code = "from flowglad import FlowGlad\nclient.payments.create(source_id=s, amount_money=m, note='x')\n";
    let result = engine.convert(code, PaymentProvider::Square, SourceKind::PythonLike);

    assert_eq!(
        result.transformed_code,
        "from flowglad import FlowGlad\nclient.payments.create(payment_source=s, amount=m, description='x')\n"
    );
}

#[test]
fn javascript_table() {
    let engine = ConversionEngine::with_defaults();
    let code = "import Stripe from 'stripe';\nconst stripe = new Stripe(process.env.STRIPE_SECRET_KEY);\nawait stripe.customers.create({ email });\n";
    let result = engine.convert_file("api/billing.ts", code, PaymentProvider::Stripe);

    assert_eq!(
        result.transformed_code,
        "import FlowGlad from 'flowglad';\nconst stripe = new FlowGlad(process.env.FLOWGLAD_SECRET_KEY);\nawait flowglad.customers.create({ email });\n"
    );
    assert_eq!(result.file_path, "api/billing.ts");
    assert_eq!(result.transformation_type, TransformationType::FullConversion);
}

#[test]
fn env_tokens_rewritten_under_every_kind() {
    let engine = ConversionEngine::with_defaults();
    for kind in ALL_KINDS {
        let result = engine.convert("key = STRIPE_SECRET_KEY", PaymentProvider::Stripe, kind);
        assert!(
            result.transformed_code.contains("FLOWGLAD_SECRET_KEY"),
            "{kind:?}"
        );
        assert!(!result.transformed_code.contains("STRIPE_SECRET_KEY"), "{kind:?}");
    }
}

#[test]
fn provider_free_text_is_untouched() {
    let engine = ConversionEngine::with_defaults();
    let code = "def fibonacci(n):\n    return n if n < 2 else fibonacci(n - 1) + fibonacci(n - 2)\n";
    for provider in [PaymentProvider::Stripe, PaymentProvider::Square] {
        for kind in ALL_KINDS {
            let once = engine.convert(code, provider, kind);
            assert!(!once.is_changed(), "{provider} {kind:?}");

            let twice = engine.convert(&once.transformed_code, provider, kind);
            assert_eq!(twice.transformed_code, once.transformed_code);
        }
    }
}

#[test]
fn converted_output_is_stable() {
    let engine = ConversionEngine::with_defaults();
    let code = "import stripe\nstripe.Subscription.create(customer=c, price=p)\n";
    let once = engine.convert(code, PaymentProvider::Stripe, SourceKind::PythonLike);
    let twice = engine.convert(
        &once.transformed_code,
        PaymentProvider::Stripe,
        SourceKind::PythonLike,
    );
    assert_eq!(twice.transformed_code, once.transformed_code);
}

#[test]
fn providers_without_rules_are_lookup_misses() {
    let engine = ConversionEngine::with_defaults();
    let code = "import stripe\nSTRIPE_SECRET_KEY = 'x'\n";
    for provider in [
        PaymentProvider::PayPal,
        PaymentProvider::Braintree,
        PaymentProvider::Unknown,
    ] {
        let result = engine.convert(code, provider, SourceKind::JavaLike);
        assert_eq!(result.transformed_code, code);
        assert!(result.applied.is_empty());
    }
}

#[test]
fn ordered_rules_chain() {
    let chain = |first: (&str, &str), second: (&str, &str)| {
        let mut catalog = RuleCatalog::new(ImportPreamble::flowglad());
        for (pattern, replacement) in [first, second] {
            catalog.push_rule(
                ConversionRule::new(pattern, replacement, pattern, PaymentProvider::Stripe)
                    .unwrap(),
            );
        }
        let engine = ConversionEngine::new(Arc::new(catalog));
        engine
            .convert("stripe.Charge.create()", PaymentProvider::Stripe, SourceKind::Generic)
            .transformed_code
    };

    let widen = (r"stripe\.Charge", "stripe.PaymentIntent");
    let rewrite = (r"stripe\.PaymentIntent\.create", "flowglad.checkout.sessions.create");

    // later rules see the output of earlier ones
    assert_eq!(chain(widen, rewrite), "flowglad.checkout.sessions.create()");
    assert_eq!(chain(rewrite, widen), "stripe.PaymentIntent.create()");
}

#[test]
fn custom_script_rule_and_keyword_rename() {
    let mut catalog = RuleCatalog::builtin();
    catalog.push_script_rule(
        ConversionRule::new(
            r"stripe\.refunds\.create",
            "flowglad.refunds.create",
            "Create refund",
            PaymentProvider::Stripe,
        )
        .unwrap(),
    );
    catalog.push_keyword_rename(
        PaymentProvider::Stripe,
        KeywordRename::new("charge", "payment_id").unwrap(),
    );
    let engine = ConversionEngine::new(Arc::new(catalog));

    let js = engine.convert(
        "await stripe.refunds.create({ charge: id });",
        PaymentProvider::Stripe,
        SourceKind::JsLike,
    );
    assert_eq!(js.transformed_code, "await flowglad.refunds.create({ charge: id });");
    assert_eq!(js.applied, vec!["Create refund"]);

    let py = engine.convert(
        "stripe.Refund.create(charge=charge_id)",
        PaymentProvider::Stripe,
        SourceKind::PythonLike,
    );
    assert_eq!(py.transformed_code, "flowglad.refunds.create(payment_id=charge_id)");

    // renames are per provider
    let square = engine.convert("refund(charge=1)", PaymentProvider::Square, SourceKind::PythonLike);
    assert!(!square.is_changed());
}

#[test]
fn migration_script_embeds_each_file() {
    let engine = ConversionEngine::with_defaults();
    let transformations = vec![
        CodeTransformation::new("import stripe", "import flowglad", TransformationType::FullConversion)
            .with_file_path("payment.py"),
        CodeTransformation::new(
            "print('x')",
            r#"print("a'''b")"#,
            TransformationType::FullConversion,
        )
        .with_file_path("billing/customer.py"),
    ];

    let script = engine.migration_script(&transformations);

    assert!(script.starts_with("#!/usr/bin/env python3\n"));
    assert!(script.contains("FlowGlad Migration Script"));
    for function in ["def backup_files(", "def apply_transformations(", "def update_env_file("] {
        assert!(script.contains(function), "missing {function}");
    }
    assert!(script.contains(r#""file_path": "payment.py","#));
    assert!(script.contains(r#""transformed_code": "import flowglad","#));
    assert!(script.contains(r#""file_path": "billing/customer.py","#));
    assert!(script.contains(r#""transformed_code": "print(\"a'''b\")","#));
    for (old, new) in ENV_RENAMES {
        assert!(script.contains(&format!("\"{old}\": \"{new}\",")));
    }
    assert!(script.trim_end().ends_with("main()"));

    // the script is itself valid Python
    let as_file = CodeTransformation::new("", script, TransformationType::FullConversion)
        .with_file_path("migrate.py");
    assert_eq!(validate_transformation(&as_file).unwrap().syntax_valid, Some(true));
}

#[test]
fn converted_python_passes_validation() {
    let engine = ConversionEngine::with_defaults();
    let code = "import stripe\n\nstripe.api_key = os.getenv('STRIPE_SECRET_KEY')\n\n\ndef pay(amount, c):\n    return stripe.PaymentIntent.create(amount=amount, customer=c)\n";
    let t = engine.convert_file("shop/pay.py", code, PaymentProvider::Stripe);

    let check = validate_transformation(&t).unwrap();
    assert_eq!(check.syntax_valid, Some(true));
    assert!(check.imports_resolved);
}

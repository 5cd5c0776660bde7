#[test]
fn macros_compile() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/entitle_error_pass.rs");
    t.pass("tests/ui/api_model_pass.rs");
}

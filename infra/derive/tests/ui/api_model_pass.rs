use entitle_derive::api_model;

#[api_model]
pub struct DomainToken {
    pub url: String,
}

#[api_model(rename_all = "snake_case", deny_unknown_fields = true)]
pub struct Strict {
    pub display_name: String,
}

fn main() {
    let token = DomainToken::default();
    let _ = token.clone() == token;
    let _ = Strict { display_name: String::new() };
}

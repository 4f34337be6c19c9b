use super::*;

#[test]
fn hidden_columns_key_is_project_scoped() {
    assert_eq!(hidden_columns_key("proj-1"), "tracedeck:proj-1:hidden-columns");
    assert_ne!(hidden_columns_key("a"), hidden_columns_key("b"));
}

#[test]
fn load_json_is_none_off_browser() {
    // Host builds have no localStorage; the helper degrades to None.
    assert_eq!(load_json::<Vec<String>>(ADMIN_TOKEN_KEY), None);
}

use super::dto::RequestContext;

pub const ANONYMOUS_USER: &str = "anonymous";

pub trait RequestContextExt {
    fn acting_user(&self) -> String;
    fn label(&self) -> String;
}

impl RequestContextExt for RequestContext {
    fn acting_user(&self) -> String {
        self.user
            .clone()
            .unwrap_or_else(|| ANONYMOUS_USER.to_string())
    }

    fn label(&self) -> String {
        format!("{} [{}]", self.acting_user(), self.request_id)
    }
}

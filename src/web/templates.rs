// src/web/templates.rs — Page templates (minijinja, embedded)

use minijinja::Environment;

/// Build the template environment. Templates are compiled into the binary;
/// a registration failure is a build defect, surfaced at startup.
pub fn environment() -> anyhow::Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("base.html", include_str!("../../templates/base.html"))?;
    env.add_template("home.html", include_str!("../../templates/home.html"))?;
    env.add_template("login.html", include_str!("../../templates/login.html"))?;
    env.add_template("signup.html", include_str!("../../templates/signup.html"))?;
    env.add_template("tasks.html", include_str!("../../templates/tasks.html"))?;
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_register() {
        let env = environment().unwrap();
        for name in ["home.html", "login.html", "signup.html", "tasks.html"] {
            assert!(env.get_template(name).is_ok(), "missing {name}");
        }
    }

    #[test]
    fn test_login_renders_error_banner() {
        let env = environment().unwrap();
        let html = env
            .get_template("login.html")
            .unwrap()
            .render(context! { authenticated => false, error => "Invalid credentials" })
            .unwrap();
        assert!(html.contains("Invalid credentials"));
    }

    #[test]
    fn test_tasks_renders_buckets() {
        let env = environment().unwrap();
        let html = env
            .get_template("tasks.html")
            .unwrap()
            .render(context! {
                authenticated => true,
                error => Option::<String>::None,
                pending => vec![context! { id => "1", title => "Buy milk", description => "2%", completed => false }],
                completed => Vec::<minijinja::Value>::new(),
            })
            .unwrap();
        assert!(html.contains("Buy milk"));
        assert!(html.contains("Nothing completed yet."));
    }
}

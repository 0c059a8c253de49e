#[cfg(test)]
mod tests {
    use skiff_core::{
        Environment, Expression, MySqlWriter, Operand, SqlWriter, Value, always, and, col, eq,
        eq_env, ge, gt, is_not_null, is_null, le, like, lt, ne, not, or, val,
    };

    const WRITER: MySqlWriter = MySqlWriter::new();

    fn render(expression: &dyn Expression, env: &Environment) -> String {
        let mut out = String::new();
        expression.write_query(&WRITER, env, &mut out);
        out
    }

    #[test]
    fn comparison_operators() {
        let env = Environment::new();
        assert_eq!(render(&eq("idticket", 1), &env), "(idticket=1)");
        assert_eq!(render(&ne("idticket", 1), &env), "(idticket<>1)");
        assert_eq!(render(&lt("priority", 3), &env), "(priority<3)");
        assert_eq!(render(&le("priority", 3), &env), "(priority<=3)");
        assert_eq!(render(&gt("priority", 3), &env), "(priority>3)");
        assert_eq!(render(&ge("priority", 3), &env), "(priority>=3)");
    }

    #[test]
    fn nested_conditions_parenthesize_every_node() {
        let env = Environment::new();
        let filter = and(eq("idticket", 1), or(eq("status", "open"), gt("priority", 3)));
        assert_eq!(
            render(&filter, &env),
            "((idticket=1) AND ((status='open') OR (priority>3)))"
        );
    }

    #[test]
    fn like_and_null_checks() {
        let env = Environment::new();
        assert_eq!(render(&like("subject", "crash%"), &env), "(subject LIKE 'crash%')");
        assert_eq!(render(&is_null("closed_at"), &env), "(closed_at IS NULL)");
        assert_eq!(
            render(&is_not_null("closed_at"), &env),
            "(closed_at IS NOT NULL)"
        );
    }

    #[test]
    fn negation_prefixes_the_condition() {
        let env = Environment::new();
        assert_eq!(render(&not(eq("idticket", 1)), &env), "NOT (idticket=1)");
    }

    #[test]
    fn environment_values_resolve_at_render_time() {
        let filter = eq_env("idcustomer", "current_customer");
        let env = Environment::new().with("current_customer", 7);
        assert_eq!(render(&filter, &env), "(idcustomer=7)");
        // An absent name renders NULL rather than failing.
        assert_eq!(render(&filter, &Environment::new()), "(idcustomer=NULL)");
    }

    #[test]
    fn string_operands_are_quoted_through_the_writer() {
        let env = Environment::new();
        assert_eq!(render(&eq("name", "O'Hara"), &env), "(name='O''Hara')");
    }

    #[test]
    fn bare_operands() {
        let env = Environment::new();
        assert_eq!(render(&col("idticket"), &env), "idticket");
        assert_eq!(render(&val(42), &env), "42");
        assert_eq!(render(&Operand::Null, &env), "NULL");
        assert_eq!(render(&val(Value::Varchar(None)), &env), "NULL");
    }

    #[test]
    fn only_the_true_literal_is_always_true() {
        assert!(always().is_always_true());
        assert!(!Operand::LitBool(false).is_always_true());
        assert!(!eq("idticket", 1).is_always_true());
        assert!(!and(always(), always()).is_always_true());
    }
}

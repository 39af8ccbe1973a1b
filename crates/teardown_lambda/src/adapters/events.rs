pub trait RuleControl {
    fn rule_names_by_target(&self, target_arn: &str) -> Result<Vec<String>, String>;
    fn delete_rule(&self, rule_name: &str) -> Result<(), String>;
}

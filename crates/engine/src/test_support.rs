//! In-memory catalog and record builders for unit tests.

use docket_types::{
    CatalogSource, CorpusItem, CorpusKind, FactField, FactFieldType, PayloadRule, Playbook, Script, Template, Workflow,
    WorkflowStep,
};

pub struct FixtureCatalog {
    pub workflows: Vec<Workflow>,
    pub playbooks: Vec<Playbook>,
    pub templates: Vec<Template>,
    pub corpus: Vec<CorpusItem>,
    pub scripts: Vec<Script>,
    pub payload_rules: Vec<PayloadRule>,
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self {
            workflows: Vec::new(),
            playbooks: Vec::new(),
            templates: Vec::new(),
            corpus: Vec::new(),
            scripts: Vec::new(),
            payload_rules: PayloadRule::builtin(),
        }
    }
}

impl FixtureCatalog {
    pub fn with_workflow(mut self, workflow: Workflow) -> Self {
        self.workflows.push(workflow);
        self
    }

    pub fn with_playbook(mut self, playbook: Playbook) -> Self {
        self.playbooks.push(playbook);
        self
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.push(template);
        self
    }

    pub fn with_corpus_item(mut self, item: CorpusItem) -> Self {
        self.corpus.push(item);
        self
    }
}

impl CatalogSource for FixtureCatalog {
    fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    fn playbooks(&self) -> &[Playbook] {
        &self.playbooks
    }

    fn templates(&self) -> &[Template] {
        &self.templates
    }

    fn corpus(&self) -> &[CorpusItem] {
        &self.corpus
    }

    fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    fn payload_rules(&self) -> &[PayloadRule] {
        &self.payload_rules
    }
}

pub fn workflow(id: &str, payload_aware: bool, step_ids: &[&str]) -> Workflow {
    Workflow {
        id: id.into(),
        title: id.into(),
        description: String::new(),
        payload_aware,
        steps: step_ids
            .iter()
            .map(|step_id| WorkflowStep {
                id: (*step_id).into(),
                title: (*step_id).into(),
                description: String::new(),
                instructions: Vec::new(),
                recommended_template_id: None,
                recommended_script_id: None,
                encouragement: None,
                payload_rule: None,
            })
            .collect(),
    }
}

pub fn template(id: &str, content: &str) -> Template {
    Template {
        id: id.into(),
        name: id.into(),
        description: String::new(),
        jurisdiction: String::new(),
        content: content.into(),
        fields: Vec::new(),
        instructions: Vec::new(),
        discernment: None,
    }
}

pub fn playbook(id: &str, template_id: &str, fact_keys: &[&str], relevant_tags: &[&str]) -> Playbook {
    Playbook {
        id: id.into(),
        title: id.into(),
        description: String::new(),
        facts: fact_keys
            .iter()
            .map(|key| FactField {
                key: (*key).into(),
                label: (*key).into(),
                kind: FactFieldType::Text,
                options: None,
            })
            .collect(),
        template_id: template_id.into(),
        relevant_tags: relevant_tags.iter().map(|tag| (*tag).into()).collect(),
        next_steps: Vec::new(),
        appeal_grounds: Vec::new(),
    }
}

pub fn corpus_item(id: &str, tags: &[&str]) -> CorpusItem {
    CorpusItem {
        id: id.into(),
        kind: CorpusKind::Statute,
        title: format!("{id} title"),
        citation: format!("{id} citation"),
        jurisdiction: String::new(),
        text: format!("{id} text"),
        notes: None,
        tags: tags.iter().map(|tag| (*tag).into()).collect(),
    }
}

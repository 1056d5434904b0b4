use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i32>,
    pub avatar: Option<String>,
    pub position: i32,
    pub status: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub parent_id: Option<i32>,
    pub avatar: Option<String>,
    pub position: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub parent_id: Option<i32>,
    pub avatar: Option<String>,
    pub position: Option<i32>,
    pub status: Option<String>,
}

/// A category with its children nested under it, for the client tree view.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

/// Builds a tree from the flat list using `parent_id`. Orphans (a parent
/// that is inactive or missing) surface as roots rather than disappearing.
#[must_use]
pub fn build_category_tree(categories: Vec<Category>) -> Vec<CategoryNode> {
    let ids: std::collections::HashSet<i32> = categories.iter().map(|c| c.id).collect();

    let mut children_of: std::collections::HashMap<i32, Vec<Category>> =
        std::collections::HashMap::new();
    let mut roots = Vec::new();

    for category in categories {
        match category.parent_id {
            Some(parent) if ids.contains(&parent) => {
                children_of.entry(parent).or_default().push(category);
            }
            _ => roots.push(category),
        }
    }

    fn attach(
        category: Category,
        children_of: &mut std::collections::HashMap<i32, Vec<Category>>,
    ) -> CategoryNode {
        let children = children_of
            .remove(&category.id)
            .unwrap_or_default()
            .into_iter()
            .map(|child| attach(child, children_of))
            .collect();
        CategoryNode { category, children }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children_of))
        .collect()
}

//! Canned response selection.
//!
//! Responses come from an ordered rule table. Each [`ResponseRule`] fires
//! when the lower-cased query contains any of its keywords; the first
//! matching rule wins, so table order is significant (`memo` is checked
//! before `button`, which is checked before `hooks`). Rule templates are
//! fixed text and ignore the retrieved context. When no rule matches, the
//! generic template embeds the context verbatim.

use crate::models::SearchResult;

/// Response used when retrieval finds nothing.
pub const FALLBACK_RESPONSE: &str = r#"Não encontrei essa informação específica nos documentos disponíveis. 

Posso ajudar com questões sobre:
• React 18 e seus hooks (useState, useEffect, useMemo, etc.)
• Componentes reutilizáveis e boas práticas
• Desenvolvimento frontend com TypeScript

Tente reformular sua pergunta ou pergunte sobre algum tópico relacionado ao React!"#;

const GENERIC_PREFIX: &str =
    "Com base nos documentos encontrados, aqui está a informação relevante:";

const GENERIC_TIP: &str = "💡 **Dica**: Se precisar de mais detalhes específicos, tente reformular sua pergunta focando em aspectos particulares do tema.";

const USE_MEMO_TEMPLATE: &str = r#"# Como usar useMemo no React 18

O **useMemo** é um hook essencial para otimização de performance no React 18:

## Sintaxe Básica
```javascript
const memoizedValue = useMemo(() => computeExpensiveValue(a, b), [a, b]);
```

## Quando usar:
✅ **Cálculos custosos** que não precisam ser refeitos a cada render
✅ **Evitar recriação** desnecessária de objetos ou arrays  
✅ **Otimizar componentes filhos** que dependem de props

## Exemplo prático:
```javascript
function ExpensiveComponent({ items }) {
  const expensiveValue = useMemo(() => {
    return items.reduce((sum, item) => sum + item.value, 0);
  }, [items]); // Só recalcula se 'items' mudar
  
  return <div>Total: {expensiveValue}</div>;
}
```

## ⚠️ Cuidados:
- Use apenas quando realmente necessário
- O array de dependências é crucial para o funcionamento correto
- Não use para valores simples (strings, números básicos)"#;

const BUTTON_TEMPLATE: &str = r#"# Criando um Componente Button Reutilizável

Aqui está um exemplo completo de um componente Button seguindo boas práticas:

## Código do Componente
```typescript
interface ButtonProps {
  children: React.ReactNode;
  variant?: 'primary' | 'secondary' | 'outline';
  size?: 'small' | 'medium' | 'large';
  disabled?: boolean;
  onClick?: () => void;
}

export default function Button({ 
  children, 
  variant = 'primary', 
  size = 'medium',
  disabled = false,
  onClick 
}: ButtonProps) {
  const baseClasses = 'font-medium rounded-lg transition-colors focus:outline-none focus:ring-2';
  
  const variantClasses = {
    primary: 'bg-primary text-primary-foreground hover:bg-primary/90',
    secondary: 'bg-secondary text-secondary-foreground hover:bg-secondary/80',
    outline: 'border border-input bg-background hover:bg-accent'
  };
  
  const sizeClasses = {
    small: 'px-3 py-1 text-sm',
    medium: 'px-4 py-2',
    large: 'px-6 py-3 text-lg'
  };
  
  return (
    <button
      className={`${baseClasses} ${variantClasses[variant]} ${sizeClasses[size]}`}
      disabled={disabled}
      onClick={onClick}
    >
      {children}
    </button>
  );
}
```

## Como usar:
```jsx
// Variações do botão
<Button variant="primary" size="large">Salvar</Button>
<Button variant="outline" size="small">Cancelar</Button>
<Button disabled>Carregando...</Button>
```

## 🎯 Boas práticas incluídas:
- **TypeScript** para type safety
- **Variantes** flexíveis (primary, secondary, outline)
- **Tamanhos** responsivos
- **Acessibilidade** com focus e disabled
- **Design tokens** do Tailwind/Shadcn"#;

const HOOKS_TEMPLATE: &str = r#"# Hooks Fundamentais do React

## useState - Gerenciamento de Estado
```javascript
const [count, setCount] = useState(0);
const [name, setName] = useState('');
const [items, setItems] = useState([]);
```

## useEffect - Efeitos Colaterais
```javascript
// Executa após cada render
useEffect(() => {
  document.title = `Count: ${count}`;
});

// Executa apenas uma vez (componentDidMount)
useEffect(() => {
  fetchData();
}, []);

// Executa quando 'count' muda
useEffect(() => {
  console.log('Count changed:', count);
}, [count]);
```

## 📋 Regras dos Hooks:
1. **Sempre** chame hooks no nível superior
2. **Não** chame hooks dentro de loops, condições ou funções aninhadas
3. **Use apenas** em componentes React ou hooks customizados

## Exemplo Completo:
```javascript
function Counter() {
  const [count, setCount] = useState(0);
  
  useEffect(() => {
    document.title = `Contador: ${count}`;
  }, [count]);
  
  return (
    <div>
      <p>Você clicou {count} vezes</p>
      <button onClick={() => setCount(count + 1)}>
        Clique aqui
      </button>
    </div>
  );
}
```"#;

/// A keyword-triggered canned response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRule {
    /// Short identifier, used in logs.
    pub name: &'static str,
    /// Lower-case substrings; any one triggers the rule.
    pub keywords: &'static [&'static str],
    pub template: &'static str,
}

impl ResponseRule {
    /// `query_lower` must already be lower-cased.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.keywords.iter().any(|k| query_lower.contains(k))
    }
}

/// Rules in priority order.
pub const RESPONSE_RULES: &[ResponseRule] = &[
    ResponseRule {
        name: "use_memo",
        keywords: &["usememo", "memo"],
        template: USE_MEMO_TEMPLATE,
    },
    ResponseRule {
        name: "button",
        keywords: &["button", "componente"],
        template: BUTTON_TEMPLATE,
    },
    ResponseRule {
        name: "hooks",
        keywords: &["hook", "usestate", "useeffect"],
        template: HOOKS_TEMPLATE,
    },
];

/// First rule whose keywords appear in `query`, if any.
pub fn matching_rule(query: &str) -> Option<&'static ResponseRule> {
    let query_lower = query.to_lowercase();
    RESPONSE_RULES.iter().find(|r| r.matches(&query_lower))
}

/// Generic answer wrapping the retrieved context.
pub fn generic_response(context: &str) -> String {
    format!("{GENERIC_PREFIX}\n\n{context}\n\n---\n\n{GENERIC_TIP}")
}

/// Choose the assistant's reply for `query`.
///
/// * No results → [`FALLBACK_RESPONSE`].
/// * A matching [`ResponseRule`] → its template (context ignored).
/// * Otherwise → [`generic_response`] over `context`.
pub fn select_response(query: &str, context: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return FALLBACK_RESPONSE.to_string();
    }
    match matching_rule(query) {
        Some(rule) => rule.template.to_string(),
        None => generic_response(context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::generate_context_from_results;
    use crate::search::{search_documents, SearchParams};
    use crate::store::knowledge::react_knowledge_base;

    fn respond(query: &str) -> String {
        let store = react_knowledge_base();
        let results = search_documents(&store, query, &SearchParams::default());
        let context = generate_context_from_results(&results);
        select_response(query, &context, &results)
    }

    #[test]
    fn empty_results_use_fallback() {
        assert_eq!(select_response("useMemo", "", &[]), FALLBACK_RESPONSE);
    }

    #[test]
    fn memo_rule_wins() {
        assert_eq!(respond("o que é useMemo?"), USE_MEMO_TEMPLATE);
        assert_eq!(matching_rule("MEMO").map(|r| r.name), Some("use_memo"));
    }

    #[test]
    fn memo_checked_before_button_and_hooks() {
        // Matches all three rules.
        let q = "useMemo hook inside a Button componente";
        assert_eq!(matching_rule(q).map(|r| r.name), Some("use_memo"));
        assert_eq!(respond(q), USE_MEMO_TEMPLATE);
    }

    #[test]
    fn button_checked_before_hooks() {
        let rule = matching_rule("componente com hooks").map(|r| r.name);
        assert_eq!(rule, Some("button"));
        assert_eq!(respond("Como criar um Button?"), BUTTON_TEMPLATE);
    }

    #[test]
    fn hooks_rule_matches_each_keyword() {
        for q in ["hooks", "useState", "useEffect cleanup"] {
            let rule = matching_rule(q).map(|r| r.name);
            assert_eq!(rule, Some("hooks"), "query {q:?}");
        }
    }

    #[test]
    fn unmatched_query_embeds_context() {
        let store = react_knowledge_base();
        let query = "qual a capital da França?";
        let results = search_documents(&store, query, &SearchParams::default());
        let context = generate_context_from_results(&results);
        let response = select_response(query, &context, &results);
        assert!(response.starts_with(GENERIC_PREFIX));
        assert!(response.contains(&context));
        assert!(response.ends_with(GENERIC_TIP));
        assert!(response.contains("\n\n---\n\n"));
    }

    #[test]
    fn rule_templates_ignore_context() {
        let store = react_knowledge_base();
        let results = search_documents(&store, "hooks", &SearchParams::default());
        let a = select_response("hooks", "context A", &results);
        let b = select_response("hooks", "context B", &results);
        assert_eq!(a, b);
        assert_eq!(a, HOOKS_TEMPLATE);
    }

    #[test]
    fn templates_keep_markdown_line_breaks() {
        assert!(USE_MEMO_TEMPLATE.contains("de objetos ou arrays  \n"));
        assert!(BUTTON_TEMPLATE.contains("function Button({ \n  children, \n"));
        assert!(FALLBACK_RESPONSE.contains("documentos disponíveis. \n\n"));
    }

    #[test]
    fn fallback_lists_supported_topics() {
        assert!(FALLBACK_RESPONSE.contains("React 18 e seus hooks"));
        assert!(FALLBACK_RESPONSE.contains("Tente reformular"));
    }
}

//! Built-in React knowledge base.
//!
//! Three Portuguese-language documents covering `useMemo`, a reusable
//! `Button` component, and the `useState`/`useEffect` hooks.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Document, DocumentMetadata, DocumentType};

use super::memory::InMemoryStore;

const USE_MEMO_CONTENT: &str = r#"
    O useMemo é um hook do React que memoriza o resultado de uma computação cara.
    
    Sintaxe: const memoizedValue = useMemo(() => computeExpensiveValue(a, b), [a, b]);
    
    Use useMemo quando:
    - Você tem cálculos custosos que não precisam ser refeitos a cada render
    - Você quer evitar recriação desnecessária de objetos ou arrays
    - Você quer otimizar componentes filhos que dependem de props
    
    Exemplo:
    function ExpensiveComponent({ items }) {
      const expensiveValue = useMemo(() => {
        return items.reduce((sum, item) => sum + item.value, 0);
      }, [items]);
      
      return <div>{expensiveValue}</div>;
    }
    "#;

const BUTTON_CONTENT: &str = r#"
    Exemplo de um componente Button reutilizável:
    
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
    "#;

const HOOKS_CONTENT: &str = r#"
    useState e useEffect são os hooks fundamentais do React.
    
    useState para gerenciar estado:
    const [count, setCount] = useState(0);
    
    useEffect para efeitos colaterais:
    useEffect(() => {
      document.title = `Count: ${count}`;
    }, [count]);
    
    Regras dos Hooks:
    1. Sempre chame hooks no nível superior
    2. Não chame hooks dentro de loops, condições ou funções aninhadas
    3. Use apenas em componentes React ou hooks customizados
    "#;

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn doc(id: &str, title: &str, content: &str, source: &str, created: DateTime<Utc>) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        metadata: DocumentMetadata {
            source: source.to_string(),
            doc_type: DocumentType::Md,
            created,
        },
    }
}

/// The three built-in documents, in ranking tie-break order.
pub fn react_documents() -> Vec<Document> {
    vec![
        doc(
            "1",
            "React 18 - useMemo Hook",
            USE_MEMO_CONTENT,
            "react-docs",
            date(2024, 1, 1),
        ),
        doc(
            "2",
            "Componente Button - Boas Práticas",
            BUTTON_CONTENT,
            "components-guide",
            date(2024, 1, 2),
        ),
        doc(
            "3",
            "React Hooks - useState e useEffect",
            HOOKS_CONTENT,
            "react-fundamentals",
            date(2024, 1, 3),
        ),
    ]
}

/// Store holding the built-in React knowledge base.
pub fn react_knowledge_base() -> InMemoryStore {
    InMemoryStore::from_unique(react_documents())
}

// src/services/machine_policy.rs
//
// Regra de negócio: quais máquinas entram no fechamento de caixa.
// Fica isolada aqui porque muda com frequência (novas lojas, novos modelos).

use crate::models::{cash::EligibilityRule, machines::Machine};

const AIRPORT_MARKER: &str = "aeroporto";
const TAKEBALL_SUFFIX: &str = "TAKEBALL";
const ARMCHAIR_MARKER: &str = "poltrona";

pub fn rule_for_store(store_name: &str) -> EligibilityRule {
    if store_name.to_lowercase().contains(AIRPORT_MARKER) {
        EligibilityRule::TodasAsMaquinas
    } else {
        EligibilityRule::TakeballOuPoltrona
    }
}

/// Sufixo TAKEBALL é comparado como cadastrado (maiúsculo); "poltrona" ignora caixa.
pub fn is_machine_eligible(rule: EligibilityRule, machine_name: &str) -> bool {
    match rule {
        EligibilityRule::TodasAsMaquinas => true,
        EligibilityRule::TakeballOuPoltrona => {
            machine_name.trim_end().ends_with(TAKEBALL_SUFFIX)
                || machine_name.to_lowercase().contains(ARMCHAIR_MARKER)
        }
    }
}

pub fn eligible_machines(store_name: &str, machines: Vec<Machine>) -> (EligibilityRule, Vec<Machine>) {
    let rule = rule_for_store(store_name);
    let eligible = machines
        .into_iter()
        .filter(|m| is_machine_eligible(rule, &m.nome))
        .collect();
    (rule, eligible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(id: i64, nome: &str) -> Machine {
        Machine {
            id,
            nome: nome.to_string(),
            codigo: None,
            loja_id: Some(1),
            capacidade_padrao: None,
            valor_ficha: None,
            alerta_id: None,
        }
    }

    fn fleet() -> Vec<Machine> {
        vec![
            machine(1, "Garra 01 TAKEBALL"),
            machine(2, "Garra Grande"),
            machine(3, "Poltrona Massagem 02"),
            machine(4, "Mini garra takeball"),
            machine(5, "Pelúcia Premium"),
        ]
    }

    #[test]
    fn airport_store_offers_every_machine() {
        let (rule, list) = eligible_machines("Agarramais Aeroporto", fleet());
        assert_eq!(rule, EligibilityRule::TodasAsMaquinas);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn airport_match_ignores_case() {
        assert_eq!(rule_for_store("LOJA AEROPORTO GRU"), EligibilityRule::TodasAsMaquinas);
    }

    #[test]
    fn other_stores_offer_only_takeball_and_armchairs() {
        let (rule, list) = eligible_machines("Agarramais Shopping Centro", fleet());
        assert_eq!(rule, EligibilityRule::TakeballOuPoltrona);
        let ids: Vec<i64> = list.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn takeball_must_be_a_suffix() {
        let rule = EligibilityRule::TakeballOuPoltrona;
        assert!(is_machine_eligible(rule, "X TAKEBALL"));
        assert!(!is_machine_eligible(rule, "TAKEBALL X"));
        assert!(is_machine_eligible(rule, "poltrona"));
        assert!(is_machine_eligible(rule, "Super POLTRONA"));
    }
}

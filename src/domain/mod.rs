// ドメイン層 - 組合せオブジェクトと列挙の中核

pub mod enumeration;
pub mod object;
pub mod permutation;

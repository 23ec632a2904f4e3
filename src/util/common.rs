pub fn cartesian_product<'a, T>(vv: &'a [Vec<T>]) -> Vec<Vec<&'a T>> {
    let lens: Vec<usize> = vv.iter().map(|l| l.len()).collect();
    if vv.is_empty() || lens.iter().any(|&l| l == 0) {
        return vec![];
    }

    let mut idxs = vec![0; vv.len()];
    let mut i = idxs.len() - 1;
    let mut res = vec![];
    loop {
        let mut v = vec![];
        for (i1, &i2) in idxs.iter().enumerate() {
            v.push(&vv[i1][i2]);
        }
        res.push(v);

        // increment idxs
        loop {
            if idxs[i] < lens[i] - 1 {
                idxs[i] += 1;
                i = idxs.len() - 1;
                break;
            } else {
                idxs[i] = 0;
                if i == 0 {
                    return res;
                }
            }
            i -= 1;
        }
    }
}

// 多重集合としてvからsubの牌をすべて取り除いた残りを返却
// 1つでも取り除けない場合はNone
pub fn try_remove_all<T: PartialEq + Clone>(v: &[T], sub: &[T]) -> Option<Vec<T>> {
    let mut res: Vec<T> = v.to_vec();
    for e in sub {
        let i = res.iter().position(|x| x == e)?;
        res.remove(i);
    }
    Some(res)
}

#[test]
fn test_cartesian_product() {
    let vv = vec![vec![1, 2], vec![3], vec![4, 5]];
    let res = cartesian_product(&vv);
    assert_eq!(res.len(), 4);
    assert_eq!(res[0], vec![&1, &3, &4]);
    assert_eq!(res[3], vec![&2, &3, &5]);
}

#[test]
fn test_try_remove_all() {
    assert_eq!(try_remove_all(&[1, 2, 2, 3], &[2, 3]), Some(vec![1, 2]));
    assert_eq!(try_remove_all(&[1, 2], &[3]), None);
}
